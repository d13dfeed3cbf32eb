use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::{debug, info};

use rs_lm_core::config::Config;
use rs_lm_core::model::language_model::LanguageModel;

/// Seed used by the `fixed` mode when no explicit seed is given.
const FIXED_SEED: u64 = 20;

/// How the random source of the model is seeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
	/// Seeded from the operating system, every run differs
	Random,
	/// Seeded with a fixed value, runs are reproducible
	Fixed,
}

/// Trains a character window language model on a corpus and prints a generated text.
///
/// Positional arguments override the values read from `--config`.
#[derive(Parser, Debug)]
#[command(name = "rs-lm", version)]
struct Cli {
	/// Number of characters in a window
	window_length: Option<usize>,

	/// Text to start the generation from
	initial_text: Option<String>,

	/// Number of characters to generate after the initial text
	target_length: Option<usize>,

	/// Seeding mode of the random source
	#[arg(value_enum)]
	mode: Option<Mode>,

	/// Training corpus (UTF-8 text file)
	corpus: Option<PathBuf>,

	/// Explicit seed (implies `fixed` unless the mode is `random`)
	#[arg(long)]
	seed: Option<u64>,

	/// TOML configuration file
	#[arg(long, short)]
	config: Option<PathBuf>,

	/// Print the learned table before the generated text
	#[arg(long)]
	dump_table: bool,
}

impl Cli {
	/// Merges the command line on top of the configuration file (if any).
	fn resolve(&self) -> Result<Config, Box<dyn std::error::Error>> {
		let mut config = match &self.config {
			Some(path) => Config::load(path)?,
			None => Config::default(),
		};

		if let Some(window_length) = self.window_length {
			config.model.window_length = window_length;
		}
		if let Some(initial_text) = &self.initial_text {
			config.generation.initial_text = initial_text.clone();
		}
		if let Some(target_length) = self.target_length {
			config.generation.target_length = target_length;
		}
		if let Some(corpus) = &self.corpus {
			config.corpus = Some(corpus.clone());
		}

		config.model.seed = match (self.mode, self.seed) {
			(Some(Mode::Random), _) => None,
			(Some(Mode::Fixed), seed) => Some(seed.or(config.model.seed).unwrap_or(FIXED_SEED)),
			(None, Some(seed)) => Some(seed),
			(None, None) => config.model.seed,
		};

		config.validate()?;
		Ok(config)
	}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	let cli = Cli::parse();
	let config = cli.resolve()?;
	debug!("resolved configuration: {:?}", config);

	let corpus = config.corpus.as_ref().ok_or("no corpus file given")?;
	let mut model = LanguageModel::from_config(&config.model)?;
	model.train_file(corpus)?;
	info!("{} windows learned", model.len());

	if cli.dump_table {
		print!("{model}");
	}

	let generation = model.generate_report(&config.generation.initial_text, config.generation.target_length);
	info!("appended {} characters ({:?})", generation.appended, generation.stop);
	println!("{}", generation.text);

	Ok(())
}
