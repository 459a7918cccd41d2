//! coordinator — runs the destination-choice engine end to end.
//!
//! Splits a population into disjoint slices, hands each slice to a worker
//! thread, and merges the replies.  All workers share one `InitGate`, so
//! the reference data is loaded once however many threads start together.
//!
//! Run with:
//!   cargo run -p coordinator --release [-- CONFIG_JSON [DATA_DIR]]
//!
//! Without `DATA_DIR` a synthetic 64-zone region and population are
//! generated.  With it, the CSV reference files and `persons.csv` are read
//! from that directory.  Set `RUST_LOG=debug` for per-cohort logging.

mod synthetic;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use memory_stats::memory_stats;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use dc_choice::ShadowPrices;
use dc_core::{EngineConfig, SeedRng};
use dc_population::{Person, load_persons_csv};
use dc_reference::{CatalogRegistry, CsvReferenceSource, ReferenceSource};
use dc_worker::{InitGate, NoopObserver, ResultSet, WorkBatch, WorkerBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const WORKER_COUNT: usize = 4;
const HOUSEHOLDS:   u32   = 5_000;
/// Zones shown in the summary table.
const TOP_ZONES:    usize = 10;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn mem_mb() -> f64 {
    memory_stats()
        .map(|s| s.physical_mem as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

fn load_config(path: &Path) -> Result<EngineConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config: EngineConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

type Inputs = (Box<dyn ReferenceSource + Sync>, Vec<Person>);

fn inputs(config: &EngineConfig, data_dir: Option<PathBuf>) -> Result<Inputs> {
    match data_dir {
        Some(dir) => {
            let persons = load_persons_csv(&dir.join("persons.csv"))?;
            Ok((Box::new(CsvReferenceSource::new(dir, config.coefficients)), persons))
        }
        None => {
            let mut rng = SeedRng::new(config.base_seed);
            let source = synthetic::reference_source(&mut rng.child(1), config.coefficients);
            let persons = synthetic::population(&mut rng.child(2), HOUSEHOLDS);
            Ok((Box::new(source), persons))
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None => EngineConfig::default(),
    };
    config.validate()?;
    let data_dir = args.next().map(PathBuf::from);

    println!("=== coordinator: work-location choice ===");
    println!(
        "Workers: {WORKER_COUNT}  |  Seed: {}  |  Catalog: {}  |  Purpose: {}",
        config.base_seed, config.zone_catalog, config.purpose
    );
    println!();

    // 1. Inputs.
    let (source, persons) = inputs(&config, data_dir)?;
    println!("Population: {} persons", persons.len());

    // 2. Load the reference data through the gate the workers will share;
    //    their own `initialize` calls then return the cached data.
    let gate = InitGate::new();
    let registry = CatalogRegistry::default();
    let data = gate.initialize(source.as_ref(), &registry, &config.zone_catalog)?;
    let max_zone = data
        .catalog
        .max_zone_id()
        .ok_or_else(|| anyhow!("reference data has no zones"))?;
    // First iteration of the outer solver: every zone at the neutral price.
    let prices = ShadowPrices::uniform(max_zone.index() + 1, 1.0)?;

    // 3. Dispatch disjoint slices; every worker goes through the same gate.
    let slice_len = persons.len().div_ceil(WORKER_COUNT).max(1);

    let t0 = Instant::now();
    let merged = std::thread::scope(|s| -> Result<ResultSet> {
        let handles: Vec<_> = persons
            .chunks(slice_len)
            .enumerate()
            .map(|(i, slice)| {
                let (gate, registry, source, config, prices) =
                    (&gate, &registry, source.as_ref(), &config, &prices);
                s.spawn(move || -> Result<_> {
                    let data = gate.initialize(source, registry, &config.zone_catalog)?;
                    let worker = WorkerBuilder::new(config.clone(), data).build()?;
                    let batch = WorkBatch::new(i as u64, slice.to_vec(), prices.clone());
                    Ok(worker.process(batch, &mut NoopObserver)?)
                })
            })
            .collect();

        let mut merged = ResultSet::new();
        for handle in handles {
            let reply = handle.join().map_err(|_| anyhow!("worker thread panicked"))??;
            info!(batch = reply.batch_id, assigned = reply.results.total_assigned(), "reply received");
            merged.merge(reply.results);
        }
        Ok(merged)
    })?;
    let elapsed = t0.elapsed();

    // 4. Summary.
    println!("Assignment complete in {:.3} s  |  reference loads: {}", elapsed.as_secs_f64(), gate.load_count());
    println!("  processed  : {}", merged.processed_count);
    println!("  unemployed : {}", merged.unemployed_count);
    println!("  assigned   : {}", merged.total_assigned());
    println!("  fallbacks  : {}", merged.fallback_count);
    println!("  anomalies  : {}", merged.anomaly_count);
    println!("  memory     : {:.1} MB", mem_mb());
    println!();

    let mut totals = merged.zone_totals();
    totals.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    println!("{:<10} {:>10}", "Zone", "Workers");
    println!("{}", "-".repeat(21));
    for (zone, n) in totals.into_iter().take(TOP_ZONES) {
        println!("{:<10} {:>10}", zone.0, n);
    }

    Ok(())
}
