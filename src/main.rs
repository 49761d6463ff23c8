//! Headless driver: runs the world on a scripted walk and logs what happens.
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use escape::prelude::*;
use escape::{init_logging, TextureHandle};
use glam::Mat4;
use log::info;

/// First-person escape game simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// World configuration file (JSON); the built-in room when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u32,
}

const TICK_SECONDS: f32 = 1.0 / 60.0;

/// Counts submissions instead of drawing them.
#[derive(Default)]
struct CountingSink {
    draws: usize,
}

impl DrawSink for CountingSink {
    fn draw(&mut self, _model: Mat4, _textures: &[TextureHandle]) {
        self.draws += 1;
    }
}

/// Walks up to the table, takes the lantern, flips the switch and then
/// waits, looking slowly around.
fn scripted_input(tick: u32) -> TickInput {
    let mut input = TickInput::idle(TICK_SECONDS);
    match tick {
        0..=47 => input.movement.forward = true,
        48 => input.interact = true,
        49 => input.toggle = true,
        _ => input.cursor.push((400.0 + f64::from(tick % 120), 400.0)),
    }
    input
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.config.as_ref().map_or_else(
        || Ok(WorldConfig::default()),
        |path| {
            WorldConfig::load(path)
                .with_context(|| format!("loading world config {}", path.display()))
        },
    )?;
    let mut world = World::new(config);
    let mut sink = CountingSink::default();

    for tick in 0..args.ticks {
        for event in world.tick(&scripted_input(tick)) {
            info!("tick {tick}: {event:?}");
        }
        world.render(&mut sink);
    }

    let light = world.light();
    info!(
        "Simulated {} ticks, {} draws; player {}, light {} and {}",
        world.tick_count(),
        sink.draws,
        if world.player_alive() { "alive" } else { "caught" },
        if light.room_lit { "on" } else { "off" },
        if light.carried { "carried" } else { "fixed" },
    );
    Ok(())
}
