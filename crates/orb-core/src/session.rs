//! Submission session.
//!
//! `Session` owns the [`InteractionState`] and the single pending timer that
//! gates `Thinking -> Result`, and derives the UI facts (button label, card
//! and share visibility, error text) from them. Hosts drive it either by
//! polling once per frame or through [`crate::pipeline::run_prediction`].

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::config::OrbConfig;
use crate::error::{SubmitError, SubmitResult};
use crate::oracle::Oracle;
use crate::random::sample_delay;
use crate::sanitize::sanitize_name;
use crate::state::{InteractionState, Prediction, Status};

/// Button label before any prediction.
pub const LABEL_PREDICT: &str = "Предсказать судьбу";
/// Button label while busy.
pub const LABEL_THINKING: &str = "Шар размышляет…";
/// Button label once a prediction exists.
pub const LABEL_AGAIN: &str = "Ещё одно предсказание";

/// An accepted submission waiting for its delay to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The sanitized name.
    pub name: String,
    /// Sampled processing delay.
    pub delay: Duration,
    /// Clock reading at which the result may be revealed.
    pub ready_at: Duration,
}

/// The orb's interaction session.
#[derive(Debug)]
pub struct Session {
    state: InteractionState,
    config: OrbConfig,
    pending: Option<Submission>,
    error: Option<String>,
    card_visible: bool,
    share_visible: bool,
}

impl Session {
    /// Create an idle session.
    pub fn new(config: OrbConfig) -> Self {
        Self {
            state: InteractionState::new(),
            config,
            pending: None,
            error: None,
            card_visible: false,
            share_visible: false,
        }
    }

    /// The interaction state.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Mutable access for the animation driver, which owns `time`.
    pub fn state_mut(&mut self) -> &mut InteractionState {
        &mut self.state
    }

    /// The session configuration.
    pub fn config(&self) -> &OrbConfig {
        &self.config
    }

    /// The in-flight submission, if any.
    pub fn pending(&self) -> Option<&Submission> {
        self.pending.as_ref()
    }

    /// Start a prediction for a raw name input.
    ///
    /// Rejected without any state change while busy. An empty sanitized name
    /// sets the validation error and hides the prediction card; otherwise the
    /// session enters `Thinking` and the sampled delay is returned.
    pub fn submit<R: Rng + ?Sized>(
        &mut self,
        raw: &str,
        now: Duration,
        rng: &mut R,
    ) -> SubmitResult<Submission> {
        if self.state.is_busy() {
            debug!("submission ignored while thinking");
            return Err(SubmitError::Busy);
        }

        let name = sanitize_name(raw);
        if name.is_empty() {
            let err = SubmitError::EmptyName;
            self.error = Some(err.to_string());
            self.card_visible = false;
            self.share_visible = self.state.prediction.is_some();
            return Err(err);
        }

        self.error = None;
        self.share_visible = false;
        self.state.enter_thinking(&name, now, &self.config.effects);

        let delay = sample_delay(rng, &self.config.delay_ms);
        let submission = Submission {
            name,
            delay,
            ready_at: now + delay,
        };
        debug!(delay_ms = delay.as_millis() as u64, "prediction scheduled");
        self.pending = Some(submission.clone());
        Ok(submission)
    }

    /// Reveal the pending prediction once its delay has elapsed.
    ///
    /// Returns the new prediction on the call that completes it.
    pub fn poll<O: Oracle + ?Sized>(
        &mut self,
        now: Duration,
        oracle: &mut O,
    ) -> Option<&Prediction> {
        let ready = self.pending.as_ref().is_some_and(|p| now >= p.ready_at);
        if !ready {
            return None;
        }
        self.complete(now, oracle)
    }

    /// Reveal the pending prediction immediately.
    ///
    /// Without a pending submission nothing changes and the current
    /// prediction, if any, is returned.
    pub fn complete<O: Oracle + ?Sized>(
        &mut self,
        now: Duration,
        oracle: &mut O,
    ) -> Option<&Prediction> {
        match self.pending.take() {
            Some(submission) => Some(self.resolve(submission, now, oracle)),
            None => self.state.prediction.as_ref(),
        }
    }

    /// Reveal the result of a submission returned by [`Session::submit`],
    /// consulting the oracle exactly once.
    pub fn resolve<O: Oracle + ?Sized>(
        &mut self,
        submission: Submission,
        now: Duration,
        oracle: &mut O,
    ) -> &Prediction {
        self.pending = None;
        self.card_visible = true;
        self.share_visible = true;

        let prediction = oracle.predict(&submission.name, true);
        info!(id = %prediction.id, name = %submission.name, "prediction revealed");
        self.state.enter_result(prediction, now, &self.config.effects)
    }

    /// Current status.
    pub fn status(&self) -> Status {
        self.state.status
    }

    /// True while a prediction is in flight.
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// The latest prediction.
    pub fn prediction(&self) -> Option<&Prediction> {
        self.state.prediction.as_ref()
    }

    /// Label for the predict button.
    pub fn button_label(&self) -> &'static str {
        if self.is_busy() {
            LABEL_THINKING
        } else if self.state.prediction.is_some() {
            LABEL_AGAIN
        } else {
            LABEL_PREDICT
        }
    }

    /// Whether the predict button accepts input.
    pub fn button_enabled(&self) -> bool {
        !self.is_busy()
    }

    /// Inline error text, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the inline error text (share notices use this too).
    pub fn set_error(&mut self, message: Option<String>) {
        self.error = message;
    }

    /// Whether the prediction card is shown.
    pub fn card_visible(&self) -> bool {
        self.card_visible && self.state.prediction.is_some()
    }

    /// Whether the export/share controls are shown.
    pub fn share_controls_visible(&self) -> bool {
        self.share_visible && self.state.prediction.is_some()
    }
}
