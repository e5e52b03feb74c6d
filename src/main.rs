//! Astersnake - headless native harness
//!
//! Drives a `Session` with a scripted pilot, logs gameplay events and prints
//! the final render snapshot as JSON. A windowed front end would implement
//! `Renderer` and feed real key state instead.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use astersnake::sim::{GameEvent, GamePhase, RenderSnapshot, Renderer};
use astersnake::session::HeldControls;
use astersnake::{Session, Tuning};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "astersnake")]
#[command(about = "Run the Astersnake simulation headless with a scripted pilot")]
struct Cli {
    /// RNG seed for the run
    #[arg(long, default_value_t = 0xA57E)]
    seed: u64,
    /// Simulation ticks to run (60 per second)
    #[arg(long, default_value_t = 3_600)]
    ticks: u32,
    /// JSON tuning file; defaults are used when omitted
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Keep restarting after game over instead of stopping
    #[arg(long)]
    restart: bool,
    /// Write the final snapshot here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Logs what a real renderer would play sounds or flash the HUD for
#[derive(Default)]
struct LogRenderer {
    frames: u64,
}

impl Renderer for LogRenderer {
    fn render(&mut self, snapshot: &RenderSnapshot) {
        self.frames += 1;
        for event in &snapshot.events {
            match event {
                GameEvent::ShotFired => log::trace!("shot fired"),
                GameEvent::ShipHit { lives_left } => {
                    log::info!("Ship hit, {lives_left} lives left")
                }
                GameEvent::GameOver { score } => log::info!("Game over with {score} points"),
                other => log::debug!("{other:?}"),
            }
        }
    }
}

/// Deterministic pilot: spin in bursts, thrust now and then, always fire
fn pilot(tick: u32) -> HeldControls {
    let phase = tick % 240;
    HeldControls {
        rotate_left: phase < 60,
        rotate_right: (120..150).contains(&phase),
        thrust: (60..90).contains(&phase),
        shoot: true,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => Tuning::from_file(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    log::info!("Astersnake (headless) starting with seed {}", cli.seed);
    let mut session = Session::new(cli.seed, tuning);
    let mut renderer = LogRenderer::default();

    for tick in 0..cli.ticks {
        match session.state().phase {
            GamePhase::Menu => session.press_confirm(),
            GamePhase::GameOver if cli.restart => session.press_confirm(),
            GamePhase::GameOver => session.request_quit(),
            GamePhase::Playing => {}
        }
        if !session.is_running() {
            break;
        }

        session.set_held(pilot(tick));
        session.step();
        session.render(&mut renderer);
    }

    let state = session.state();
    log::info!(
        "Finished after {} frames (seed {}): score {}, high score {}, level {}",
        renderer.frames,
        state.seed,
        state.score(),
        state.high_score,
        state.world.level
    );

    let json = serde_json::to_string_pretty(&session.snapshot())?;
    match &cli.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?
        }
        None => println!("{json}"),
    }
    Ok(())
}
