//! Interaction state: status, prediction payload, animation time, and the
//! one-shot overlay deadlines armed by status transitions.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EffectSet;

/// How long the flash ring stays up after entering `Thinking`.
pub const FLASH_WINDOW: Duration = Duration::from_millis(260);
/// How long the charge ring grows after entering `Thinking`.
pub const CHARGE_WINDOW: Duration = Duration::from_millis(800);
/// How long the burst ring expands after entering `Result`.
pub const RESULT_BURST_WINDOW: Duration = Duration::from_millis(450);

/// The orb's interaction status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Waiting for a first name.
    #[default]
    Idle,
    /// A prediction is being "computed".
    Thinking,
    /// A prediction is on display.
    Result,
}

impl Status {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Thinking => "thinking",
            Self::Result => "result",
        }
    }

    /// Parse a lowercase status name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "idle" => Some(Self::Idle),
            "thinking" => Some(Self::Thinking),
            "result" => Some(Self::Result),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prediction produced by the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// Short identifier, used in the exported file name.
    pub id: String,
    /// The prediction text.
    pub text: String,
}

/// An optional absolute deadline on the session clock.
///
/// Deadlines are armed by transitions and only ever read afterwards; an
/// expired deadline is simply inactive, it is never cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline(Option<Duration>);

impl Deadline {
    /// A deadline that was never armed.
    pub const UNSET: Self = Self(None);

    /// Arm at `now + window`.
    pub fn arm(&mut self, now: Duration, window: Duration) {
        self.0 = Some(now + window);
    }

    /// The absolute deadline, if armed.
    pub fn at(self) -> Option<Duration> {
        self.0
    }

    /// True while `now` is strictly before the deadline.
    pub fn is_active(self, now: Duration) -> bool {
        self.0.is_some_and(|until| now < until)
    }

    /// Remaining share of `window` while active: `(deadline - now) / window`.
    pub fn remaining_fraction(self, now: Duration, window: Duration) -> Option<f64> {
        let until = self.0?;
        if now >= until || window.is_zero() {
            return None;
        }
        Some((until - now).as_secs_f64() / window.as_secs_f64())
    }
}

/// The single mutable interaction state threaded through the renderer and
/// the transition functions.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    /// Current status.
    pub status: Status,
    /// Last sanitized name that started a prediction.
    pub name: String,
    /// Latest prediction; kept until the next one replaces it.
    pub prediction: Option<Prediction>,
    /// Animation clock in seconds, written by the animation driver.
    pub time: f64,
    /// Flash ring deadline.
    pub flash: Deadline,
    /// Charge ring deadline.
    pub charge: Deadline,
    /// Result burst deadline.
    pub result_burst: Deadline,
}

impl InteractionState {
    /// Fresh idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Animation time as a clock reading, for deadline comparisons.
    pub fn now(&self) -> Duration {
        Duration::from_secs_f64(self.time.max(0.0))
    }

    /// Transition into `Thinking`, arming the flash (and charge) overlays.
    pub fn enter_thinking(&mut self, name: &str, now: Duration, effects: &EffectSet) {
        debug!(from = %self.status, name, "entering thinking");
        self.status = Status::Thinking;
        self.name = name.to_string();
        self.flash.arm(now, FLASH_WINDOW);
        if effects.charge {
            self.charge.arm(now, CHARGE_WINDOW);
        }
    }

    /// Transition into `Result` with a fresh prediction, arming the burst overlay.
    pub fn enter_result(
        &mut self,
        prediction: Prediction,
        now: Duration,
        effects: &EffectSet,
    ) -> &Prediction {
        debug!(from = %self.status, id = %prediction.id, "entering result");
        self.status = Status::Result;
        if effects.result_burst {
            self.result_burst.arm(now, RESULT_BURST_WINDOW);
        }
        self.prediction.insert(prediction)
    }

    /// True while a prediction is in flight.
    pub fn is_busy(&self) -> bool {
        self.status == Status::Thinking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn status_round_trips_names() {
        for s in [Status::Idle, Status::Thinking, Status::Result] {
            assert_eq!(Status::parse(s.as_str()), Some(s));
        }
        assert_eq!(Status::parse(" Thinking "), Some(Status::Thinking));
        assert_eq!(Status::parse("done"), None);
    }

    #[test]
    fn deadline_inactive_until_armed() {
        let d = Deadline::UNSET;
        assert!(!d.is_active(Duration::ZERO));
        assert_eq!(d.remaining_fraction(Duration::ZERO, ms(100)), None);
    }

    #[test]
    fn deadline_expires_strictly() {
        let mut d = Deadline::default();
        d.arm(ms(1000), ms(260));
        assert!(d.is_active(ms(1000)));
        assert!(d.is_active(ms(1259)));
        assert!(!d.is_active(ms(1260)));
        assert_eq!(d.at(), Some(ms(1260)));
    }

    #[test]
    fn deadline_fraction_counts_down() {
        let mut d = Deadline::default();
        d.arm(ms(0), ms(800));
        let start = d.remaining_fraction(ms(0), ms(800)).unwrap();
        let mid = d.remaining_fraction(ms(400), ms(800)).unwrap();
        assert!((start - 1.0).abs() < 1e-9);
        assert!((mid - 0.5).abs() < 1e-9);
        assert_eq!(d.remaining_fraction(ms(800), ms(800)), None);
    }

    #[test]
    fn thinking_arms_flash_and_charge() {
        let mut state = InteractionState::new();
        state.enter_thinking("Анна", ms(500), &EffectSet::all());
        assert_eq!(state.status, Status::Thinking);
        assert_eq!(state.name, "Анна");
        assert_eq!(state.flash.at(), Some(ms(760)));
        assert_eq!(state.charge.at(), Some(ms(1300)));
        assert!(state.is_busy());
    }

    #[test]
    fn charge_left_unarmed_when_disabled() {
        let mut state = InteractionState::new();
        state.enter_thinking("Ivo", ms(0), &EffectSet::minimal());
        assert!(state.flash.is_active(ms(10)));
        assert_eq!(state.charge, Deadline::UNSET);
    }

    #[test]
    fn result_keeps_overlapping_overlays() {
        let mut state = InteractionState::new();
        state.enter_thinking("Ivo", ms(0), &EffectSet::all());
        state.enter_result(
            Prediction {
                id: "abc".into(),
                text: "Soon.".into(),
            },
            ms(200),
            &EffectSet::all(),
        );
        assert_eq!(state.status, Status::Result);
        // flash, charge and burst all live at 240ms
        let now = ms(240);
        assert!(state.flash.is_active(now));
        assert!(state.charge.is_active(now));
        assert!(state.result_burst.is_active(now));
        assert_eq!(state.prediction.as_ref().map(|p| p.id.as_str()), Some("abc"));
    }

    #[test]
    fn now_tracks_time() {
        let state = InteractionState {
            time: 1.5,
            ..InteractionState::default()
        };
        assert_eq!(state.now(), ms(1500));
    }
}
