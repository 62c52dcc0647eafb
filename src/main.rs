//! Lane Clash entry point
//!
//! Headless driver: runs one autopiloted session on a virtual frame clock and
//! prints the result. Set `RUST_LOG=debug` to watch every spawn and resolution.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;

use lane_clash::sim::{GameEvent, GameSession, Symbol, autopilot};
use lane_clash::{Settings, Variant};

#[derive(Parser, Debug)]
#[command(name = "lane-clash")]
#[command(about = "Run a headless Lane Clash session with the autopilot at the wheel")]
struct Args {
    /// RNG seed (defaults to the current time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Rule preset: classic or lives
    #[arg(short, long, default_value = "lives")]
    variant: String,

    /// JSON settings file (overrides --variant)
    #[arg(short, long)]
    config: Option<String>,

    /// Starting symbol: rock, paper or scissors
    #[arg(long, default_value = "rock")]
    symbol: String,

    /// Stop after this much simulated time
    #[arg(long, default_value_t = 300)]
    max_seconds: u64,

    /// Simulated frame length in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Sleep for each frame instead of running as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn load_settings(args: &Args) -> Result<Settings> {
    if let Some(path) = &args.config {
        return Settings::load(path).with_context(|| format!("loading {}", path));
    }
    let Some(variant) = Variant::from_str(&args.variant) else {
        bail!("unknown variant {:?} (expected classic or lives)", args.variant);
    };
    Ok(Settings::from_variant(variant))
}

fn seed_from_time() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = load_settings(&args)?;
    let symbol: Symbol = args.symbol.parse()?;
    let seed = args.seed.unwrap_or_else(seed_from_time);
    if args.frame_ms == 0 {
        bail!("--frame-ms must be positive");
    }

    log::info!(
        "Lane Clash starting: seed {}, variant {}, symbol {}",
        seed,
        settings.variant.as_str(),
        symbol
    );

    let mut session = GameSession::new(seed, settings);
    session.choose_symbol(symbol);

    let frame = Duration::from_millis(args.frame_ms);
    let max_frames = args.max_seconds * 1000 / args.frame_ms;
    let mut misses = 0u32;
    let mut frames = 0u64;

    while session.is_active() && frames < max_frames {
        if let Some(lane) = autopilot::pick_lane(&session.snapshot()) {
            session.set_lane(lane);
        }
        session.tick(frame);

        for event in session.drain_events() {
            match event {
                GameEvent::Missed { .. } => misses += 1,
                GameEvent::SpeedRamped { speed } => log::info!("Speed {:.1}", speed),
                _ => {}
            }
        }

        if args.realtime {
            std::thread::sleep(frame);
        }
        frames += 1;
    }
    session.shutdown();

    let snapshot = session.snapshot();
    if args.json {
        println!("{}", snapshot.to_json()?);
        return Ok(());
    }

    println!();
    println!("=== {} ===", if snapshot.is_over() { "GAME OVER" } else { "TIME UP" });
    println!("  Seed:      {}", seed);
    println!("  Score:     {}", snapshot.score);
    println!("  Lives:     {}", snapshot.lives);
    println!("  Letters:   {}", snapshot.letters_display());
    println!("  Misses:    {}", misses);
    println!("  Speed:     {:.1}", snapshot.speed);
    println!(
        "  Survived:  {:.1}s",
        (frames * args.frame_ms) as f64 / 1000.0
    );
    Ok(())
}
