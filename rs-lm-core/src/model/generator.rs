use std::collections::HashMap;

use log::trace;
use rand::Rng;

use super::distribution::Distribution;
use super::window::Window;

/// Upper bound on the output capacity reserved up front.
const PREALLOCATED_CHARS: usize = 1 << 16;

/// Why a generation run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
	/// The requested number of characters was appended.
	LengthReached,
	/// The trailing window never occurred in the training corpus.
	UnknownWindow,
	/// The initial text is shorter than the window; nothing was generated.
	InitialTextTooShort,
}

/// Result of a generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct Generation {
	/// The initial text followed by the generated characters.
	pub text: String,
	/// Number of characters appended to the initial text.
	pub appended: usize,
	/// Why the run ended.
	pub stop: StopReason,
}

/// Character-by-character generator over a trained table.
///
/// Each call to `next` looks up the current trailing window, samples the
/// following character from its distribution and slides the window forward.
/// The iterator ends (for good) the first time the window is not found.
///
/// The generator borrows the table immutably, so any number of them can run
/// over the same trained model, each with its own random source.
pub struct Generator<'a, R: Rng + ?Sized> {
	table: &'a HashMap<String, Distribution>,
	window: Window,
	rng: &'a mut R,
	stalled: bool,
}

impl<'a, R: Rng + ?Sized> Generator<'a, R> {
	/// Starts a generator from the last `window_length` characters of `initial_text`.
	///
	/// Returns `None` if `initial_text` is shorter than the window.
	pub(crate) fn new(
		table: &'a HashMap<String, Distribution>,
		window_length: usize,
		rng: &'a mut R,
		initial_text: &str,
	) -> Option<Self> {
		let window = Window::trailing(initial_text, window_length)?;
		Some(Self { table, window, rng, stalled: false })
	}

	/// The current trailing window.
	pub fn window(&self) -> &str {
		self.window.key()
	}
}

impl<R: Rng + ?Sized> Iterator for Generator<'_, R> {
	type Item = char;

	fn next(&mut self) -> Option<char> {
		if self.stalled {
			return None;
		}
		let Some(distribution) = self.table.get(self.window.key()) else {
			trace!("window {:?} not in table, stopping", self.window.key());
			self.stalled = true;
			return None;
		};
		let next_char = distribution.sample(&mut *self.rng);
		self.window.advance(next_char);
		Some(next_char)
	}
}

/// Appends up to `target_length` generated characters to `initial_text`.
///
/// # Behavior
/// - If `initial_text` is shorter than the window, it is returned unchanged.
/// - Otherwise the full `initial_text` is kept as the output prefix and the
///   generation continues from its trailing window.
/// - Stops early, without error, when the trailing window is unknown.
pub(crate) fn generate<R: Rng + ?Sized>(
	table: &HashMap<String, Distribution>,
	window_length: usize,
	rng: &mut R,
	initial_text: &str,
	target_length: usize,
) -> Generation {
	let Some(mut generator) = Generator::new(table, window_length, rng, initial_text) else {
		return Generation {
			text: initial_text.to_owned(),
			appended: 0,
			stop: StopReason::InitialTextTooShort,
		};
	};

	// Generation may stall long before `target_length`
	let mut text = String::with_capacity(initial_text.len().saturating_add(target_length.min(PREALLOCATED_CHARS)));
	text.push_str(initial_text);

	let mut appended = 0;
	while appended < target_length {
		match generator.next() {
			Some(c) => {
				text.push(c);
				appended += 1;
			}
			None => return Generation { text, appended, stop: StopReason::UnknownWindow },
		}
	}

	Generation { text, appended, stop: StopReason::LengthReached }
}
