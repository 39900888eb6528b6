use std::fs;
use std::path::Path;

use colored::Colorize;
use orb_core::{EffectSet, InteractionState, Status};
use orb_render::{AnimationDriver, FrameRenderer};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use super::FrameArgs;

pub fn run(
    status: &str,
    seed: u64,
    reduced_motion: bool,
    frame: &FrameArgs,
    output: &Path,
) -> Result<(), String> {
    let status = Status::parse(status).ok_or_else(|| {
        format!("unknown status '{status}' (expected idle, thinking or result)")
    })?;
    let timestamp = frame.timestamp()?;
    frame.check_geometry()?;

    let mut state = InteractionState {
        status,
        ..InteractionState::default()
    };
    let renderer = FrameRenderer::new(reduced_motion, EffectSet::all());
    let mut driver = AnimationDriver::new(frame.size, frame.size, frame.scale, renderer);
    let mut rng = StdRng::seed_from_u64(seed);
    let stats = driver.tick(timestamp, &mut state, &mut rng);
    debug!(%status, ?stats, "frame rendered");

    let png = driver
        .surface()
        .encode_png()
        .map_err(|e| format!("cannot encode frame: {e}"))?;
    fs::write(output, png).map_err(|e| format!("cannot write {}: {e}", output.display()))?;

    let (w, h) = driver.surface().device_size();
    println!(
        "  {} {} frame at t={}s {}",
        "Rendered".green().bold(),
        status,
        frame.time,
        format!("({w}x{h} px, {} bolts)", stats.bolts).dimmed()
    );
    println!("  {}", output.display());
    Ok(())
}
