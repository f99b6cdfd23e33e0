//! Supervised Hidden Markov Models with Viterbi decoding.
//!
//! This crate estimates the transition and emission matrices of a discrete
//! HMM from fully labeled training sequences, and decodes the most likely
//! hidden-state path for new observation sequences.
//!
//! ## Core idea
//! 1. Collect [`TrainingSequence`]s (paired state/observation labels).
//! 2. Call [`estimate`] to obtain a [`Model`] of row-normalised counts.
//! 3. Build a [`ViterbiDecoder`] with [`DecoderBuilder`], choosing a start
//!    distribution and a score space ([`Probability`] or [`LogProbability`]).
//! 4. Decode observation sequences into [`DecodedPath`]s.
//!
//! ## Quick start
//! ```
//! use hmm_dp::{estimate, DecoderBuilder, Probability, StartDistribution, TrainingSequence};
//!
//! let corpus = vec![
//!     TrainingSequence::new(vec![0, 1, 2], vec![0, 1, 0]).unwrap(),
//!     TrainingSequence::new(vec![0, 1, 1], vec![0, 0, 1]).unwrap(),
//! ];
//! let model = estimate(&corpus);
//! assert_eq!(model.transitions()[0], vec![0.0, 1.0, 0.0]);
//!
//! let decoder = DecoderBuilder::new(&model)
//!     .start(StartDistribution::Explicit(vec![1.0, 0.0, 0.0]))
//!     .build::<Probability>()
//!     .unwrap();
//! let path = decoder.decode(&[0, 1, 1]).unwrap();
//! assert_eq!(path.states(), &[0, 1, 1]);
//! ```
//!
//! ## Degenerate rows
//! States never seen as a transition source (or emitter) get all-zero rows.
//! Paths that run into them have zero likelihood; the decoder still returns a
//! path, picked by the lowest-index tie-break, and tags it with
//! [`PathStatus::DeadEnd`].

pub mod builder;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod io;
pub mod labels;
pub mod model;
pub mod traits;
pub mod utils;
pub mod viterbi;

pub use crate::builder::{DecoderBuilder, StartDistribution};
pub use crate::engine::ViterbiDecoder;
pub use crate::error::{HmmError, Result};
pub use crate::estimator::{estimate, TrainingSequence};
pub use crate::labels::{Label, LabelIndex};
pub use crate::model::Model;
pub use crate::traits::{LogProbability, PathScore, Probability};
pub use crate::viterbi::{DecodedPath, PathStatus, ViterbiTable};
