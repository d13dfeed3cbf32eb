use std::collections::HashMap;
use std::io::Write;

use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_lm_core::Result;
use rs_lm_core::model::generator::StopReason;
use rs_lm_core::model::language_model::LanguageModel;

const CORPUS: &str = "To be, or not to be, that is the question:\n\
	Whether 'tis nobler in the mind to suffer\n\
	The slings and arrows of outrageous fortune,\n\
	Or to take arms against a sea of troubles\n\
	And by opposing end them. To die—to sleep,\n\
	No more; and by a sleep to say we end\n";

fn trained(window_length: usize, seed: u64) -> Result<LanguageModel> {
	let mut model = LanguageModel::with_seed(window_length, seed)?;
	model.train_str(CORPUS)?;
	Ok(model)
}

/// Counts, for every window, how many times it is followed by a character.
fn followed_occurrences(corpus: &str, window_length: usize) -> HashMap<String, usize> {
	let chars: Vec<char> = corpus.chars().collect();
	let mut occurrences = HashMap::new();
	for start in 0..chars.len().saturating_sub(window_length) {
		let window: String = chars[start..start + window_length].iter().collect();
		*occurrences.entry(window).or_insert(0) += 1;
	}
	occurrences
}

#[test]
fn abab_table() -> Result<()> {
	let mut model = LanguageModel::with_seed(2, 20)?;
	model.train_str("abab")?;
	assert_eq!(model.len(), 2);

	let ab = model.distribution("ab").expect("window ab");
	assert_eq!(ab.entries().len(), 1);
	assert_eq!(ab.entries()[0].character, 'a');
	assert_eq!(ab.entries()[0].count, 1);
	assert_eq!(ab.entries()[0].p, 1.0);

	let ba = model.distribution("ba").expect("window ba");
	assert_eq!(ba.entries().len(), 1);
	assert_eq!(ba.entries()[0].character, 'b');
	assert_eq!(ba.entries()[0].count, 1);
	assert_eq!(ba.entries()[0].p, 1.0);

	assert_eq!(model.generate("ab", 2), "abab");
	Ok(())
}

#[test]
fn unknown_window_stalls_immediately() -> Result<()> {
	let mut model = trained(2, 20)?;
	assert!(model.distribution("xy").is_none());

	let report = model.generate_report("xy", 5);
	assert_eq!(report.text, "xy");
	assert_eq!(report.appended, 0);
	assert_eq!(report.stop, StopReason::UnknownWindow);
	Ok(())
}

#[test]
fn huge_target_length_on_unknown_window() -> Result<()> {
	let mut model = LanguageModel::with_seed(2, 20)?;
	model.train_str("abab")?;
	assert_eq!(model.generate("xy", usize::MAX), "xy");
	assert_eq!(model.generate("xy", isize::MAX as usize + 1), "xy");

	let report = model.generate_report("xy", 1_000_000_000_000);
	assert_eq!(report.text, "xy");
	assert_eq!(report.stop, StopReason::UnknownWindow);
	Ok(())
}

#[test]
fn huge_target_length_stalls_on_corpus_tail() -> Result<()> {
	let mut model = LanguageModel::with_seed(2, 20)?;
	model.train_str("abcd")?;
	assert_eq!(model.generate("ab", usize::MAX), "abcd");
	Ok(())
}

#[test]
fn stalls_on_corpus_tail() -> Result<()> {
	// "cd" only occurs at the end of the corpus, so it has no follower
	let mut model = LanguageModel::with_seed(2, 20)?;
	model.train_str("abcd")?;
	let report = model.generate_report("ab", 10);
	assert_eq!(report.text, "abcd");
	assert_eq!(report.appended, 2);
	assert_eq!(report.stop, StopReason::UnknownWindow);
	Ok(())
}

#[test]
fn count_conservation() -> Result<()> {
	for window_length in 1..=5 {
		let model = trained(window_length, 20)?;
		let expected = followed_occurrences(CORPUS, window_length);
		assert_eq!(model.len(), expected.len());
		for window in model.windows() {
			assert_eq!(window.chars().count(), window_length);
			let distribution = model.distribution(window).unwrap();
			assert_eq!(distribution.total(), expected[window], "window {window:?}");
			assert!(distribution.entries().iter().all(|entry| entry.count >= 1));
		}
	}
	Ok(())
}

#[test]
fn probabilities_are_normalized_and_monotonic() -> Result<()> {
	let model = trained(2, 20)?;
	for window in model.windows() {
		let entries = model.distribution(window).unwrap().entries();
		let sum: f64 = entries.iter().map(|entry| entry.p).sum();
		assert!((sum - 1.0).abs() < 1e-9, "window {window:?} sums to {sum}");
		assert!((entries.last().unwrap().cp - 1.0).abs() < 1e-9);
		for pair in entries.windows(2) {
			assert!(pair[1].cp >= pair[0].cp);
		}
		for entry in entries {
			assert!((0.0..=1.0).contains(&entry.p));
		}
	}
	Ok(())
}

#[test]
fn same_seed_same_output() -> Result<()> {
	let mut first = trained(3, 42)?;
	let mut second = trained(3, 42)?;
	let a = first.generate("To be", 300);
	let b = second.generate("To be", 300);
	assert_eq!(a, b);
	assert!(a.starts_with("To be"));
	Ok(())
}

#[test]
fn injected_rng_is_deterministic() -> Result<()> {
	let model = trained(3, 0)?;
	let a = model.generate_with(&mut StdRng::seed_from_u64(9), "the", 200);
	let b = model.generate_with(&mut StdRng::seed_from_u64(9), "the", 200);
	assert_eq!(a, b);
	Ok(())
}

#[test]
fn unseeded_models_still_follow_the_table() -> Result<()> {
	let mut model = LanguageModel::new(2)?;
	model.train_str("abcabcabc")?;
	assert_eq!(model.generate("ab", 6), "abcabcab");
	Ok(())
}

#[test]
fn short_initial_text_is_returned_unchanged() -> Result<()> {
	let mut model = trained(4, 20)?;
	for target_length in [0, 1, 50] {
		assert_eq!(model.generate("To", target_length), "To");
		let report = model.generate_report("", target_length);
		assert_eq!(report.text, "");
		assert_eq!(report.stop, StopReason::InitialTextTooShort);
	}
	Ok(())
}

#[test]
fn initial_prefix_is_preserved() -> Result<()> {
	let mut model = LanguageModel::with_seed(2, 20)?;
	model.train_str("abababab")?;
	let report = model.generate_report("xxab", 3);
	assert_eq!(report.text, "xxababa");
	assert_eq!(report.appended, 3);
	assert_eq!(report.stop, StopReason::LengthReached);
	Ok(())
}

#[test]
fn generated_length_counts_characters() -> Result<()> {
	let mut model = LanguageModel::with_seed(1, 20)?;
	model.train_str("éàéàéà")?;
	let text = model.generate("é", 4);
	assert_eq!(text, "éàéàé");
	assert_eq!(text.chars().count(), 5);
	Ok(())
}

#[test]
fn zero_target_length() -> Result<()> {
	let mut model = trained(2, 20)?;
	let report = model.generate_report("To", 0);
	assert_eq!(report.text, "To");
	assert_eq!(report.stop, StopReason::LengthReached);
	Ok(())
}

#[test]
fn retraining_is_idempotent() -> Result<()> {
	let first = trained(3, 1)?;
	let second = trained(3, 2)?;
	assert_eq!(first.len(), second.len());
	for window in first.windows() {
		assert_eq!(first.distribution(window), second.distribution(window));
	}
	Ok(())
}

#[test]
fn generator_yields_only_new_characters() -> Result<()> {
	let mut model = LanguageModel::with_seed(2, 20)?;
	model.train_str("abcd")?;
	let mut rng = StdRng::seed_from_u64(3);

	let mut generator = model.generator(&mut rng, "zab").expect("long enough");
	assert_eq!(generator.window(), "ab");
	let generated: String = generator.by_ref().collect();
	assert_eq!(generated, "cd");
	assert_eq!(generator.window(), "cd");
	assert_eq!(generator.next(), None);

	assert!(model.generator(&mut rng, "a").is_none());
	Ok(())
}

#[test]
fn train_from_file_and_reader() -> Result<()> {
	let mut file = tempfile::NamedTempFile::new()?;
	file.write_all(CORPUS.as_bytes())?;

	let mut from_file = LanguageModel::with_seed(3, 20)?;
	from_file.train_file(file.path())?;

	let mut from_reader = LanguageModel::with_seed(3, 20)?;
	from_reader.train_reader(CORPUS.as_bytes())?;

	let from_str = trained(3, 20)?;
	assert_eq!(from_file.to_string(), from_str.to_string());
	assert_eq!(from_reader.to_string(), from_str.to_string());
	Ok(())
}
