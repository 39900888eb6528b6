//! Command-line front end for the mystic orb.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{EffectFlags, FrameArgs};

#[derive(Parser)]
#[command(
    name = "orb",
    about = "Mystic orb: ask the ball for a prediction",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the orb for a prediction and export the shareable card
    Predict {
        /// First name to read the fate of
        name: String,

        /// RNG seed for the oracle and the procedural effects
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Directory the card is downloaded into
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Skip the simulated thinking delay
        #[arg(long)]
        no_delay: bool,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,

        /// Suppress pulse, flicker, lightning and expanding rings
        #[arg(long)]
        reduced_motion: bool,

        #[command(flatten)]
        frame: FrameArgs,

        #[command(flatten)]
        effects: EffectFlags,
    },

    /// Render a single animation frame as PNG
    Render {
        /// Status to render: idle, thinking, result
        #[arg(long, default_value = "idle")]
        status: String,

        /// RNG seed for flicker and lightning
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Suppress pulse, flicker, lightning and expanding rings
        #[arg(long)]
        reduced_motion: bool,

        #[command(flatten)]
        frame: FrameArgs,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print prefilled share links for a text
    Links {
        /// Text to share
        text: String,

        /// Page URL to attach (default: the orb's page)
        #[arg(long)]
        url: Option<String>,

        /// Maximum characters of text to include
        #[arg(long, default_value = "180")]
        budget: usize,
    },

    /// Show the per-status animation profiles
    Profiles {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Predict {
            name,
            seed,
            out,
            no_delay,
            json,
            reduced_motion,
            frame,
            effects,
        } => commands::predict::run(&commands::predict::PredictOptions {
            name,
            seed,
            out,
            no_delay,
            json,
            reduced_motion,
            frame,
            effects: effects.to_set(),
        }),
        Commands::Render {
            status,
            seed,
            reduced_motion,
            frame,
            output,
        } => commands::render::run(&status, seed, reduced_motion, &frame, &output),
        Commands::Links { text, url, budget } => commands::links::run(&text, url.as_deref(), budget),
        Commands::Profiles { json } => commands::profiles::run(json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
