use std::fmt;

use rand::Rng;

/// Statistics about one character observed to follow a given window.
///
/// `p` and `cp` are only meaningful once the owning collection has been
/// frozen into a [`Distribution`]; while counting they stay at `0.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterCount {
	/// The following character.
	pub character: char,
	/// How many times `character` followed the window.
	pub count: usize,
	/// `count / total` over all entries of the window.
	pub p: f64,
	/// Running sum of `p` in stored order.
	pub cp: f64,
}

impl CharacterCount {
	fn new(character: char) -> Self {
		Self { character, count: 0, p: 0.0, cp: 0.0 }
	}
}

impl fmt::Display for CharacterCount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({} {} {} {})", self.character.escape_debug(), self.count, self.p, self.cp)
	}
}

/// Mutable per-window counters used while a corpus is being read.
///
/// Entries keep the order in which each following character was first
/// observed. The collection is append-only: entries are never removed or
/// reordered, only their counts are incremented.
#[derive(Clone, Debug, Default)]
pub(crate) struct CharCounts {
	entries: Vec<CharacterCount>,
}

impl CharCounts {
	/// Records one occurrence of `next_char` after the window.
	///
	/// - If the character was already seen, its count is increased.
	/// - Otherwise, a new entry is appended with an initial count of 1.
	pub(crate) fn update(&mut self, next_char: char) {
		let index = match self.entries.iter().position(|entry| entry.character == next_char) {
			Some(index) => index,
			None => {
				self.entries.push(CharacterCount::new(next_char));
				self.entries.len() - 1
			}
		};
		self.entries[index].count += 1;
	}

	/// Computes `p` and `cp` for every entry and freezes the collection.
	///
	/// Two passes over the stored order: one to sum the counts, one to
	/// assign the probabilities.
	pub(crate) fn finalize(mut self) -> Distribution {
		let total: usize = self.entries.iter().map(|entry| entry.count).sum();

		let mut cumulative = 0.0;
		for entry in &mut self.entries {
			entry.p = entry.count as f64 / total as f64;
			cumulative += entry.p;
			entry.cp = cumulative;
		}

		Distribution { entries: self.entries.into_boxed_slice() }
	}
}

/// Finalized, read-only distribution of the characters following a window.
///
/// ## Invariants
/// - At least one entry, and every entry has `count >= 1`
/// - `cp` is non-decreasing and the last one is 1.0 within rounding
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution {
	entries: Box<[CharacterCount]>,
}

impl Distribution {
	/// Entries in first-observed order.
	pub fn entries(&self) -> &[CharacterCount] {
		&self.entries
	}

	/// Total number of observations behind this distribution.
	pub fn total(&self) -> usize {
		self.entries.iter().map(|entry| entry.count).sum()
	}

	/// Inverse-CDF selection for a draw `r` in `[0, 1)`.
	///
	/// Returns the first character whose cumulative probability is strictly
	/// greater than `r`. When rounding leaves the last `cp` just below `r`,
	/// the last character is returned.
	pub fn select(&self, r: f64) -> char {
		self.entries
			.iter()
			.find(|entry| entry.cp > r)
			.or_else(|| self.entries.last())
			.map(|entry| entry.character)
			// A finalized distribution is never empty
			.unwrap_or_default()
	}

	/// Draws a uniform value from `rng` and selects a character with it.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
		let r: f64 = rng.random();
		self.select(r)
	}
}

impl fmt::Display for Distribution {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut first = true;
		for entry in self.entries.iter() {
			if !first {
				f.write_str(" ")?;
			}
			write!(f, "{entry}")?;
			first = false;
		}
		Ok(())
	}
}
