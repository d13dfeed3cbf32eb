use std::collections::VecDeque;

/// Fixed-length sliding window over a character stream.
///
/// Characters live in a ring buffer; advancing is a pop/push pair. The
/// lookup key is a reused `String` buffer rebuilt after each advance.
///
/// ## Invariants
/// - `chars.len()` never changes after construction
/// - `key` always spells `chars` in order
#[derive(Clone, Debug)]
pub(crate) struct Window {
	chars: VecDeque<char>,
	key: String,
}

impl Window {
	/// Reads exactly `length` characters from `source`.
	///
	/// Returns the number of characters actually read as the error when the
	/// source runs out first.
	pub(crate) fn fill<I: Iterator<Item = char>>(source: &mut I, length: usize) -> Result<Self, usize> {
		let chars: VecDeque<char> = source.by_ref().take(length).collect();
		if chars.len() < length {
			return Err(chars.len());
		}
		let key = chars.iter().collect();
		Ok(Self { chars, key })
	}

	/// Builds a window from the last `length` characters of `text`.
	///
	/// Returns `None` if `text` holds fewer than `length` characters.
	pub(crate) fn trailing(text: &str, length: usize) -> Option<Self> {
		let count = text.chars().count();
		if count < length {
			return None;
		}
		let mut tail = text.chars().skip(count - length);
		Self::fill(&mut tail, length).ok()
	}

	pub(crate) fn key(&self) -> &str {
		&self.key
	}

	/// Drops the first character and appends `next_char`.
	pub(crate) fn advance(&mut self, next_char: char) {
		debug_assert!(!self.chars.is_empty());
		self.chars.pop_front();
		self.chars.push_back(next_char);
		self.key.clear();
		self.key.extend(self.chars.iter());
	}
}
