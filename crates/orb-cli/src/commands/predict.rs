use std::path::PathBuf;

use colored::Colorize;
use orb_core::pipeline::run_prediction;
use orb_core::share::{self, DirectoryDownloads, NoShare, ShareLinks, ShareOutcome};
use orb_core::{Clock, EffectSet, ManualClock, MonotonicClock, OrbConfig, Session, TableOracle};
use orb_render::artifact::TITLE;
use orb_render::{AnimationDriver, Artifact, FrameRenderer, build_artifact};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use tracing::debug;

use super::FrameArgs;

pub struct PredictOptions {
    pub name: String,
    pub seed: u64,
    pub out: PathBuf,
    pub no_delay: bool,
    pub json: bool,
    pub reduced_motion: bool,
    pub frame: FrameArgs,
    pub effects: EffectSet,
}

pub fn run(opts: &PredictOptions) -> Result<(), String> {
    let after = opts.frame.timestamp()?;
    opts.frame.check_geometry()?;

    let config = OrbConfig::default()
        .with_seed(opts.seed)
        .with_reduced_motion(opts.reduced_motion)
        .with_effects(opts.effects)
        .with_download_dir(&opts.out);
    let renderer = FrameRenderer::new(config.reduced_motion, config.effects);
    let mut session = Session::new(config);
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let mut oracle = TableOracle::new(opts.seed);

    debug!(seed = opts.seed, no_delay = opts.no_delay, "running prediction");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| format!("cannot start runtime: {e}"))?;

    // without the delay, a manual clock stands in for the wait
    let manual = ManualClock::default();
    let monotonic = MonotonicClock::new();
    let (prediction, clock): (_, &dyn Clock) = if opts.no_delay {
        let skip = |delay| {
            manual.advance(delay);
            std::future::ready(())
        };
        let p = runtime.block_on(run_prediction(
            &mut session,
            &opts.name,
            &manual,
            &mut rng,
            &mut oracle,
            skip,
        ));
        (p, &manual as &dyn Clock)
    } else {
        let p = runtime.block_on(run_prediction(
            &mut session,
            &opts.name,
            &monotonic,
            &mut rng,
            &mut oracle,
            tokio::time::sleep,
        ));
        (p, &monotonic as &dyn Clock)
    };
    let prediction = prediction.map_err(|e| e.to_string())?;

    let size = opts.frame.size;
    let mut driver = AnimationDriver::new(size, size, opts.frame.scale, renderer);
    driver.tick(clock.now() + after, session.state_mut(), &mut rng);

    let artifact = build_artifact(driver.surface(), session.prediction()).map(Artifact::into_file);
    let mut downloads = DirectoryDownloads::new(&session.config().download_dir);
    let outcome = share::share_or_download(
        &mut NoShare,
        &mut downloads,
        artifact,
        TITLE,
        &prediction.text,
    );
    let path = match outcome {
        ShareOutcome::Downloaded(path) => path,
        ShareOutcome::Shared => PathBuf::new(),
        ShareOutcome::Notice(msg) => return Err(msg),
    };

    let config = session.config();
    let links = ShareLinks::build(&prediction.text, &config.page_url, config.share_text_budget)
        .map_err(|e| format!("invalid page url: {e}"))?;

    if opts.json {
        let report = json!({
            "name": session.state().name,
            "status": session.status(),
            "prediction": prediction,
            "file": path,
            "links": links,
        });
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("cannot serialize report: {e}"))?;
        println!("{text}");
        return Ok(());
    }

    println!(
        "  {} {}",
        "The orb speaks to".bold(),
        session.state().name.bold().magenta()
    );
    println!();
    println!("  {}", prediction.text);
    println!();
    println!("  {} {}", "Card:".dimmed(), path.display());
    for (label, link) in links.labelled() {
        println!("  {} {link}", format!("{label}:").dimmed());
    }

    Ok(())
}
