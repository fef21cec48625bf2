//! meadow — a few dozen creatures deciding what to do next.
//!
//! Even-numbered creatures run behavior trees picked by life stage; odd ones
//! run the goal planner with the utility scorer behind it.  The camera sits
//! in one corner of the field, so far-away creatures are throttled.
//!
//! ```bash
//! cargo run -p meadow                      # built-in configuration
//! cargo run -p meadow -- mind.toml         # scheduler config from TOML
//! RUST_LOG=mind_sched=debug cargo run -p meadow
//! ```

mod decisions;
mod world;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mind_core::{AgentId, Position, Tick};
use mind_sched::{DecisionStyle, SchedulerBuilder, SchedulerConfig, ThrottleConfig};

use decisions::DecisionLog;
use world::{Commands, Meadow};

// ── Constants ─────────────────────────────────────────────────────────────────

const CREATURE_COUNT: u32 = 40;
const SEED:           u64 = 7;
const TOTAL_TICKS:    u64 = 24 * 5;
const OUTPUT_DIR:     &str = "output/meadow";

/// Tick at which one creature dies and another wanders off the map.
const MISHAP_TICK:    u64 = 60;

fn default_config() -> SchedulerConfig {
    SchedulerConfig {
        max_per_tick: 16,
        seed: SEED,
        throttle: Some(ThrottleConfig { radius: 60.0, far_evaluation_chance: 0.25 }),
        ..SchedulerConfig::default()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .compact()
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SchedulerConfig::from_toml_file(&path)?,
        None => default_config(),
    };
    println!("=== meadow ===");
    println!(
        "Creatures: {CREATURE_COUNT}  |  Ticks: {TOTAL_TICKS}  |  Per tick: {}  |  Seed: {}",
        config.max_per_tick, config.seed
    );
    println!();

    // 1. World and scheduler.
    let mut meadow = Meadow::new(CREATURE_COUNT, SEED);
    let mut scheduler = SchedulerBuilder::new(config).build()?;
    for c in meadow.creatures() {
        let style = if c.id.0 % 2 == 0 { DecisionStyle::Tree } else { DecisionStyle::Utility };
        scheduler.register_agent_with(c.id, style);
    }
    scheduler.set_focus(Some(Position::ORIGIN));

    // 2. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut log = DecisionLog::create(&Path::new(OUTPUT_DIR).join("decisions.csv"))?;
    let mut commands = Commands::default();

    // 3. Run.
    let t0 = Instant::now();
    let mut max_writes = 0;
    for t in 0..TOTAL_TICKS {
        let now = Tick(t);
        meadow.step(now);

        if t == MISHAP_TICK {
            meadow.kill(AgentId(3));
            meadow.despawn(AgentId(5));
            scheduler.force_goal(AgentId(0), "Flee", &mut commands)?;
            scheduler.force_action(AgentId(1), "groom")?;
            info!(tick = t, "mishap: 3 died, 5 left, 0 is spooked, 1 is grooming");
        }

        scheduler.tick_observed(now, &meadow, Some(&meadow), &mut commands, &mut log);
        max_writes = max_writes.max(commands.len());
        meadow.apply(&mut commands);

        if t % 24 == 0 {
            info!(tick = t, weather = %meadow.weather(), registered = scheduler.active_count(), "day start");
        }
    }
    log.finish()?;
    if let Some(e) = log.take_error() {
        warn!(error = %e, "decision log incomplete");
    }
    let elapsed = t0.elapsed();

    // 4. Summary.
    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    println!("  decisions.csv : {} rows", log.rows);
    println!(
        "  evaluated {}  skipped {}  throttled {}  removed {}",
        log.totals.evaluated, log.totals.skipped, log.totals.throttled, log.totals.removed
    );
    println!("  most writes in one tick: {max_writes}");
    println!();

    println!("{:<8} {:<8} {:<8} {:<24} {:<12}", "Agent", "Stage", "Style", "Last intent", "Goal");
    println!("{}", "-".repeat(64));
    for c in meadow.creatures().iter().take(8) {
        let (style, intent) = scheduler
            .slot(c.id)
            .map(|s| (s.style().to_string(), s.last_intent().to_string()))
            .unwrap_or_else(|| ("-".into(), "(unregistered)".into()));
        println!(
            "{:<8} {:<8} {:<8} {:<24} {:<12}",
            c.id.0,
            c.stage,
            style,
            intent,
            c.goal.as_deref().unwrap_or("-"),
        );
    }
    println!();

    for agent in [AgentId(0), AgentId(1)] {
        if let Some(snapshot) = scheduler.debug_snapshot(agent) {
            print!("{snapshot}");
        }
    }
    Ok(())
}
