//! Headless frame loop.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Args;
use showtime_config::Settings;
use showtime_core::{Engine, Graph, WallClock};

use super::common::{load_state, print_outputs};

#[derive(Args)]
pub struct RunArgs {
    /// Tempo in beats per minute (overrides settings)
    #[arg(long)]
    bpm: Option<f64>,

    /// Saved state to run (overrides settings)
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(short, long, default_value = "8")]
    beats: u64,

    /// Pace frames with the wall clock instead of simulating them
    #[arg(long)]
    realtime: bool,
}

pub fn run(args: RunArgs, mut settings: Settings) -> anyhow::Result<()> {
    if let Some(bpm) = args.bpm {
        settings.bpm = bpm;
    }
    settings.validate()?;

    let graph = match &args.state {
        Some(path) => load_state(path)?,
        None if settings.state_file.exists() => load_state(&settings.state_file)?,
        None => {
            tracing::info!(
                path = %settings.state_file.display(),
                "no saved state, starting empty"
            );
            Graph::new()
        }
    };

    let interval = Duration::from_millis(settings.frame_interval_ms);
    let mut engine = Engine::new(graph, settings.bpm);
    println!(
        "Running {} node(s) at {} BPM for {} tick(s)",
        engine.graph().node_count(),
        settings.bpm,
        args.beats
    );

    if args.realtime {
        println!("Press Ctrl+C to stop...\n");
        let running = Arc::new(AtomicBool::new(true));
        let r = Arc::clone(&running);
        ctrlc::set_handler(move || {
            println!("\nStopping...");
            r.store(false, Ordering::SeqCst);
        })?;

        let clock = WallClock::start();
        while running.load(Ordering::SeqCst) && engine.ticks() < args.beats {
            std::thread::sleep(interval);
            step(&mut engine, clock.elapsed());
        }
    } else {
        let mut elapsed = Duration::ZERO;
        while engine.ticks() < args.beats {
            elapsed += interval;
            step(&mut engine, elapsed);
        }
    }

    println!("Done after {} tick(s)", engine.ticks());
    Ok(())
}

fn step(engine: &mut Engine, elapsed: Duration) {
    let report = engine.frame(elapsed);
    if report.ticked {
        println!("tick {} (beat {:.3})", engine.ticks(), report.phase);
        print_outputs(engine.graph());
    }
}
