use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::distribution::{CharCounts, Distribution};
use super::generator::{self, Generation, Generator};
use super::window::Window;
use crate::config::ModelConfig;
use crate::error::{Error, Result, invalid_config};
use crate::io::{read_corpus, read_corpus_file};

/// Character-level sliding window language model.
///
/// The model maps every window of `window_length` characters seen in the
/// training corpus to the distribution of the character that followed it,
/// then generates text by repeatedly sampling from that table.
///
/// # Responsibilities
/// - Build the distribution table from a corpus in a single pass
/// - Generate text from an initial text, with the owned or an injected random source
/// - Render the table for diagnostics
///
/// # Invariants
/// - `window_length` is always >= 1 and never changes
/// - Every key in `table` has exactly `window_length` characters
/// - The table is only replaced as a whole, at the end of a successful training
#[derive(Debug)]
pub struct LanguageModel {
	window_length: usize,
	table: HashMap<String, Distribution>,
	rng: StdRng,
}

impl LanguageModel {
	/// Creates a model whose random source is seeded from the operating system.
	///
	/// Two generations with the same inputs will usually differ.
	///
	/// # Errors
	/// Returns an error if `window_length` is zero.
	pub fn new(window_length: usize) -> Result<Self> {
		Self::with_rng(window_length, StdRng::from_os_rng())
	}

	/// Creates a model with a deterministic random source.
	///
	/// Generating from two models built with the same seed and trained on the
	/// same corpus produces the same texts.
	///
	/// # Errors
	/// Returns an error if `window_length` is zero.
	pub fn with_seed(window_length: usize, seed: u64) -> Result<Self> {
		Self::with_rng(window_length, StdRng::seed_from_u64(seed))
	}

	/// Creates a model from its configuration section.
	pub fn from_config(config: &ModelConfig) -> Result<Self> {
		config.validate()?;
		match config.seed {
			Some(seed) => Self::with_seed(config.window_length, seed),
			None => Self::new(config.window_length),
		}
	}

	fn with_rng(window_length: usize, rng: StdRng) -> Result<Self> {
		if window_length == 0 {
			return Err(invalid_config("window_length must be a positive integer"));
		}
		Ok(Self { window_length, table: HashMap::new(), rng })
	}

	pub fn window_length(&self) -> usize {
		self.window_length
	}

	/// Number of distinct windows in the table.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Returns the distribution learned for `window`, if it was observed.
	pub fn distribution(&self, window: &str) -> Option<&Distribution> {
		self.table.get(window)
	}

	/// Iterates over the known windows, in no particular order.
	pub fn windows(&self) -> impl Iterator<Item = &str> {
		self.table.keys().map(String::as_str)
	}

	/// Builds the distribution table from a character stream.
	///
	/// # Behavior
	/// - The first `window_length` characters form the initial window.
	/// - Each following character is counted against the current window,
	///   then the window slides forward by one character.
	/// - Once the stream is exhausted, probabilities and cumulative
	///   probabilities are computed for every window.
	/// - The previous table, if any, is replaced.
	///
	/// # Errors
	/// Returns `Error::InsufficientCorpus` if the stream holds fewer than
	/// `window_length` characters. The current table is left untouched.
	pub fn train_chars<I: IntoIterator<Item = char>>(&mut self, corpus: I) -> Result<()> {
		let mut corpus = corpus.into_iter();
		let mut window = Window::fill(&mut corpus, self.window_length).map_err(|found| {
			Error::InsufficientCorpus { window_length: self.window_length, found }
		})?;

		let mut counts: HashMap<String, CharCounts> = HashMap::new();
		let mut observations = 0usize;
		for next_char in corpus {
			match counts.get_mut(window.key()) {
				Some(char_counts) => char_counts.update(next_char),
				None => {
					let mut char_counts = CharCounts::default();
					char_counts.update(next_char);
					counts.insert(window.key().to_owned(), char_counts);
				}
			}
			window.advance(next_char);
			observations += 1;
		}

		self.table = counts
			.into_iter()
			.map(|(key, char_counts)| (key, char_counts.finalize()))
			.collect();

		debug!(
			"trained model: window_length={} observations={} windows={}",
			self.window_length,
			observations,
			self.table.len()
		);
		Ok(())
	}

	/// Trains on an in-memory corpus.
	pub fn train_str(&mut self, corpus: &str) -> Result<()> {
		self.train_chars(corpus.chars())
	}

	/// Trains on a UTF-8 stream.
	///
	/// The whole stream is buffered in memory and decoded before training
	/// starts; use [`LanguageModel::train_chars`] to feed characters lazily.
	pub fn train_reader<R: Read>(&mut self, reader: R) -> Result<()> {
		let corpus = read_corpus(reader)?;
		self.train_str(&corpus)
	}

	/// Trains on a UTF-8 text file.
	pub fn train_file<P: AsRef<Path>>(&mut self, filepath: P) -> Result<()> {
		let corpus = read_corpus_file(&filepath)?;
		debug!("read corpus {} ({} bytes)", filepath.as_ref().display(), corpus.len());
		self.train_str(&corpus)
	}

	/// Generates text using the model's own random source.
	///
	/// See [`LanguageModel::generate_report_with`] for the exact behavior.
	pub fn generate(&mut self, initial_text: &str, target_length: usize) -> String {
		self.generate_report(initial_text, target_length).text
	}

	/// Like [`LanguageModel::generate`], also reporting why generation stopped.
	pub fn generate_report(&mut self, initial_text: &str, target_length: usize) -> Generation {
		let generation =
			generator::generate(&self.table, self.window_length, &mut self.rng, initial_text, target_length);
		debug!("generated {} characters, stop: {:?}", generation.appended, generation.stop);
		generation
	}

	/// Generates text with an injected random source.
	///
	/// The model is only borrowed, so this can be called on a shared model.
	pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, initial_text: &str, target_length: usize) -> String {
		self.generate_report_with(rng, initial_text, target_length).text
	}

	/// Generates up to `target_length` characters after `initial_text`.
	///
	/// # Behavior
	/// - If `initial_text` has fewer than `window_length` characters, it is
	///   returned unchanged (`StopReason::InitialTextTooShort`).
	/// - Otherwise the output is `initial_text` followed by the generated
	///   characters, sampled from the trailing window of the text so far.
	/// - Generation stops early (`StopReason::UnknownWindow`) when the
	///   trailing window was never seen during training.
	pub fn generate_report_with<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		initial_text: &str,
		target_length: usize,
	) -> Generation {
		generator::generate(&self.table, self.window_length, rng, initial_text, target_length)
	}

	/// Returns a lazy character generator starting from `initial_text`.
	///
	/// The iterator yields only the new characters and ends when the trailing
	/// window is unknown. Returns `None` if `initial_text` is shorter than the window.
	pub fn generator<'a, R: Rng + ?Sized>(&'a self, rng: &'a mut R, initial_text: &str) -> Option<Generator<'a, R>> {
		Generator::new(&self.table, self.window_length, rng, initial_text)
	}
}

/// One line per window, sorted by window:
/// `<window> : (c count p cp) (c count p cp) ...`
impl fmt::Display for LanguageModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut windows: Vec<(&String, &Distribution)> = self.table.iter().collect();
		windows.sort_by(|a, b| a.0.cmp(b.0));
		for (window, distribution) in windows {
			writeln!(f, "{} : {}", window.escape_debug(), distribution)?;
		}
		Ok(())
	}
}
