use serde::Serialize;

use crate::state::Status;

/// Animation intensity for one status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModeProfile {
    /// Scales the body's breathing pulse.
    pub pulse_amplitude: f64,
    /// Multiplies every glow and gradient alpha.
    pub glow_multiplier: f64,
    /// Angular speed of the particle field and the thinking arcs.
    pub rotation_speed: f64,
    /// Per-frame probability of a lightning strike.
    pub lightning_chance: f64,
}

/// Profile while idle.
pub const IDLE: ModeProfile = ModeProfile {
    pulse_amplitude: 0.1,
    glow_multiplier: 0.7,
    rotation_speed: 0.45,
    lightning_chance: 0.05,
};

/// Profile while thinking.
pub const THINKING: ModeProfile = ModeProfile {
    pulse_amplitude: 0.55,
    glow_multiplier: 1.28,
    rotation_speed: 1.7,
    lightning_chance: 0.3,
};

/// Profile while showing a result.
pub const RESULT: ModeProfile = ModeProfile {
    pulse_amplitude: 0.18,
    glow_multiplier: 0.85,
    rotation_speed: 0.62,
    lightning_chance: 0.08,
};

impl ModeProfile {
    /// The fixed profile for a status.
    pub fn for_status(status: Status) -> &'static ModeProfile {
        match status {
            Status::Idle => &IDLE,
            Status::Thinking => &THINKING,
            Status::Result => &RESULT,
        }
    }

    /// All profiles in status order.
    pub fn table() -> [(Status, &'static ModeProfile); 3] {
        [
            (Status::Idle, &IDLE),
            (Status::Thinking, &THINKING),
            (Status::Result, &RESULT),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thinking_is_the_most_intense() {
        let idle = ModeProfile::for_status(Status::Idle);
        let thinking = ModeProfile::for_status(Status::Thinking);
        let result = ModeProfile::for_status(Status::Result);
        for other in [idle, result] {
            assert!(thinking.pulse_amplitude > other.pulse_amplitude);
            assert!(thinking.glow_multiplier > other.glow_multiplier);
            assert!(thinking.rotation_speed > other.rotation_speed);
            assert!(thinking.lightning_chance > other.lightning_chance);
        }
    }

    #[test]
    fn table_matches_lookup() {
        for (status, profile) in ModeProfile::table() {
            assert_eq!(ModeProfile::for_status(status), profile);
        }
    }

    #[test]
    fn profile_serializes() {
        let json = serde_json::to_value(ModeProfile::for_status(Status::Idle)).unwrap();
        assert_eq!(json["lightning_chance"], 0.05);
    }
}
