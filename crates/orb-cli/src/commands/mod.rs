pub mod links;
pub mod predict;
pub mod profiles;
pub mod render;

use std::time::Duration;

use clap::Args;
use orb_core::EffectSet;

/// Largest surface side, in device pixels, the rendering commands accept.
pub const MAX_DEVICE_SIDE: f32 = 8192.0;

/// Live surface geometry and timing shared by the rendering commands.
#[derive(Args, Debug, Clone)]
pub struct FrameArgs {
    /// Animation time in seconds (for predict: seconds after the reveal)
    #[arg(long, default_value = "0.2")]
    pub time: f64,

    /// Side of the square orb surface in logical pixels
    #[arg(long, default_value = "360")]
    pub size: f32,

    /// Device pixels per logical pixel
    #[arg(long, default_value = "2.0")]
    pub scale: f32,
}

impl FrameArgs {
    /// Validate and convert the time flag.
    pub fn timestamp(&self) -> Result<Duration, String> {
        if !self.time.is_finite() || self.time < 0.0 {
            return Err(format!("--time must be a non-negative number, got {}", self.time));
        }
        Ok(Duration::from_secs_f64(self.time))
    }

    /// Validate the surface geometry.
    pub fn check_geometry(&self) -> Result<(), String> {
        if !(self.size.is_finite() && self.size >= 1.0) {
            return Err(format!("--size must be at least 1, got {}", self.size));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(format!("--scale must be positive, got {}", self.scale));
        }
        let side = (self.size * self.scale).round();
        if side > MAX_DEVICE_SIDE {
            return Err(format!(
                "--size × --scale is {side} device pixels, the limit is {MAX_DEVICE_SIDE}"
            ));
        }
        Ok(())
    }
}

/// Switches for the optional overlays.
#[derive(Args, Debug, Clone, Copy)]
pub struct EffectFlags {
    /// Disable the charge ring on entering thinking
    #[arg(long)]
    pub no_charge: bool,

    /// Disable the burst ring on reveal
    #[arg(long)]
    pub no_burst: bool,

    /// Disable the thinking rings and arcs
    #[arg(long)]
    pub no_rings: bool,
}

impl EffectFlags {
    pub fn to_set(self) -> EffectSet {
        EffectSet {
            charge: !self.no_charge,
            result_burst: !self.no_burst,
            thinking_rings: !self.no_rings,
        }
    }
}
