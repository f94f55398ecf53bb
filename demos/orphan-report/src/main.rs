//! Reports which items no spawn table can reach.
//!
//! Runs against the bundled synthetic armory; wiring a real asset decoder in
//! place of the fixtures is the only change needed for live data.

use spawncheck::{audit, AuditConfig, Projector};
use spawncheck_test::armory;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AuditConfig::load("spawncheck.toml").unwrap_or_default();

    let (nodes, resolver) = armory();
    let projector = Projector::new(config.projection.clone(), &resolver);
    let store = projector.project(nodes)?;

    let report = audit(&store, &config.report);
    println!(
        "Count of category-{} items not spawnable in any table: {}",
        config.report.category,
        report.orphaned.len()
    );
    for id in &report.orphaned {
        println!("  - {id}");
    }
    Ok(())
}
