//! Core logic for the mystic orb.
//!
//! Holds everything the orb needs that is not pixels: the interaction state
//! machine (idle, thinking, result) with its one-shot overlay deadlines, the
//! per-status mode profiles consumed by the renderer, name sanitization, the
//! greedy word wrap used by the artifact compositor, the prediction oracle,
//! and the share/download fallback chain.

/// Clock sources for the animation loop and overlay deadlines.
pub mod clock;
/// Configuration for an orb session.
pub mod config;
/// Error types for the core crate.
pub mod error;
/// Per-status animation constants.
pub mod mode;
/// The prediction oracle collaborator and its default phrase tables.
pub mod oracle;
/// Async submission pipeline: validate, think, reveal.
pub mod pipeline;
/// Bounded uniform sampling shared by all procedural effects.
pub mod random;
/// Name input sanitization.
pub mod sanitize;
/// Submission session: the state machine plus the pending timer and UI facts.
pub mod session;
/// Share links and the share-or-download fallback chain.
pub mod share;
/// Interaction state, statuses, predictions, and overlay deadlines.
pub mod state;
/// Greedy word wrap over an injected measure function.
pub mod text;

/// Re-exports of [`clock::Clock`], [`clock::ManualClock`] and [`clock::MonotonicClock`].
pub use clock::{Clock, ManualClock, MonotonicClock};
/// Re-exports of [`config::EffectSet`] and [`config::OrbConfig`].
pub use config::{EffectSet, OrbConfig};
/// Re-exports of [`error::ShareError`], [`error::SubmitError`] and [`error::SubmitResult`].
pub use error::{ShareError, SubmitError, SubmitResult};
/// Re-export of [`mode::ModeProfile`].
pub use mode::ModeProfile;
/// Re-exports of [`oracle::Oracle`] and [`oracle::TableOracle`].
pub use oracle::{Oracle, TableOracle};
/// Re-export of [`sanitize::sanitize_name`].
pub use sanitize::sanitize_name;
/// Re-exports of [`session::Session`] and [`session::Submission`].
pub use session::{Session, Submission};
/// Re-exports of [`state::Deadline`], [`state::InteractionState`], [`state::Prediction`] and [`state::Status`].
pub use state::{Deadline, InteractionState, Prediction, Status};
/// Re-export of [`text::wrap_words`].
pub use text::wrap_words;
