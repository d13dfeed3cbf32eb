//! Sliding window language model.
//!
//! - Per-window character statistics (`Distribution`)
//! - The trained model and its table (`LanguageModel`)
//! - Text generation over a trained table (`Generator`)

/// Per-window character counts, probabilities and weighted selection.
///
/// Counts are accumulated in a mutable collection during training, then
/// frozen into an immutable `Distribution`.
pub mod distribution;

/// Character generation over a trained table.
///
/// Exposes the lazy `Generator` iterator and the `Generation` report.
pub mod generator;

/// The language model: configuration, training and generation entry points.
pub mod language_model;

/// Fixed-length ring buffer window.
mod window;
