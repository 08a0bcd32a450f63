//! atlas_small — smallest end-to-end run of the area-race pipeline.
//!
//! Loads a six-entry atlas and an eight-entry time table embedded in the
//! binary, builds the keyframes, and prints the chart at every observed
//! timestamp plus the transition window of the final leader.
//!
//! ```text
//! atlas_small [CONFIG_JSON]
//! ```
//!
//! `CONFIG_JSON` is an optional `RaceConfig` document, e.g.
//! `{"max_rank": 3, "steps": 4, "single_index": "placeholder"}`.
//! Log verbosity follows `RUST_LOG`.

mod fixture;

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use ar_core::{RaceConfig, SingleIndexPolicy};
use ar_dataset::{load_atlas_reader, load_time_table_reader};
use ar_pipeline::{PipelineBuilder, RaceOutput};

use fixture::{ATLAS_JSON, TIME_TABLE_CSV};

// ── Constants ─────────────────────────────────────────────────────────────────

const MAX_RANK: usize = 3; // n: bars on the chart
const STEPS:    usize = 4; // k: keyframes per observed interval

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atlas_small=info,ar_pipeline=info,ar_dataset=warn".into()),
        )
        .init();

    // 1. Configuration.
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => RaceConfig::new(MAX_RANK, STEPS, SingleIndexPolicy::Placeholder),
    };
    tracing::info!(?config, "race configuration");

    // 2. Inputs.
    let dataset = load_atlas_reader(Cursor::new(ATLAS_JSON))?;
    let table = load_time_table_reader(Cursor::new(TIME_TABLE_CSV))?;
    println!("=== atlas_small — area race ===");
    println!(
        "Entities: {}  |  Time indices: {}  |  n = {}  |  k = {}",
        dataset.len(),
        table.len(),
        config.max_rank,
        config.steps
    );
    println!();

    // 3. Run.
    let pipeline = PipelineBuilder::new(config, dataset, table).build()?;
    let t0 = Instant::now();
    let output = pipeline.run()?;
    let elapsed = t0.elapsed();

    // 4. Summary.
    println!("Pipeline complete in {:.3} ms", elapsed.as_secs_f64() * 1_000.0);
    println!("  samples            : {}", output.sample_count);
    println!("  observed timestamps: {}", output.aggregated.len());
    println!("  keyframes          : {}", output.keyframes.len());
    for rejected in &output.rejected {
        println!("  skipped {} period {:?}: {}", rejected.entity, rejected.period, rejected.error);
    }
    println!();

    print_charts(&output, pipeline.config.steps);
    print_leader_window(&output);

    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<RaceConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: RaceConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Print the chart at each observed timestamp (every `steps`-th keyframe).
fn print_charts(output: &RaceOutput, steps: usize) {
    for (i, keyframe) in output.keyframes.iter().enumerate().step_by(steps) {
        println!("keyframe {i:>3}  {}", keyframe.time);
        for record in keyframe.top(output.max_rank) {
            println!("  #{:<2} {:<16} {:>8.1}", record.rank + 1, record.name, record.value);
        }
    }
    println!();
}

fn print_leader_window(output: &RaceOutput) {
    let Some(last) = output.last_keyframe() else {
        return;
    };
    let Some(leader) = last.records.first() else {
        return;
    };
    let i = output.keyframes.len() - 1;
    if let Some(w) = output.frame_index.window(leader.id, i) {
        println!(
            "Final leader {} ({}): rank {} → {} → {}",
            leader.name, leader.id, w.previous.rank, w.current.rank, w.next.rank
        );
    }
}
