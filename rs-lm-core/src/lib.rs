//! Character-level sliding window language model.
//!
//! This crate learns, from a training corpus, which character tends to follow
//! each window of `k` characters, then generates new text from those
//! statistics:
//! - Single-pass table construction (window → next-character distribution)
//! - Inverse-CDF sampling of the next character
//! - Reproducible generation with a seeded random source
//!
//! ```
//! use rs_lm_core::model::language_model::LanguageModel;
//!
//! let mut model = LanguageModel::with_seed(2, 20)?;
//! model.train_str("abab")?;
//! assert_eq!(model.generate("ab", 2), "abab");
//! # Ok::<(), rs_lm_core::Error>(())
//! ```

/// Language model, distributions and generation.
pub mod model;

/// Run configuration (TOML).
pub mod config;

/// Error type shared by the crate.
pub mod error;

/// I/O utilities (corpus and config file loading).
///
/// Not exposed
pub(crate) mod io;

pub use error::{Error, Result};
