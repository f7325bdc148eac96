//! Headless skill simulation entry point.
mod config;
mod journal;
mod logging;
mod simulation;

use std::path::PathBuf;

use anyhow::{Context, Result};
use config::SimConfig;
use journal::JournalSummary;
use simulation::{SimReport, Simulation};
use skill_runtime::PoolStats;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = logging::setup_logging(&config.log_dir)?;

    let journal_path = config.log_dir.join("events.jsonl");
    let outcome = run_with_journal(config, journal_path.clone()).await?;

    let report = &outcome.report;
    info!(
        target: "skill::sim",
        steps = report.steps,
        casts = report.casts,
        failed_casts = report.failed_casts,
        contact_engagements = report.contact_engagements,
        deactivations = report.deactivations,
        releases = report.releases,
        kills = report.kills,
        "Simulation finished"
    );
    for stats in &outcome.pools {
        info!(
            target: "skill::sim",
            pool = %stats.name,
            total = stats.total,
            in_use = stats.in_use,
            "Pool usage"
        );
    }

    let summary = &outcome.journal;
    info!(
        target: "skill::sim",
        path = %journal_path.display(),
        events = summary.events,
        hits_applied = summary.hits_applied,
        texts_shown = summary.texts_shown,
        lagged = summary.lagged,
        "Event journal written"
    );
    Ok(())
}

struct RunOutcome {
    report: SimReport,
    pools: Vec<PoolStats>,
    journal: JournalSummary,
}

/// Runs the simulation on a blocking thread while the journal task drains
/// the event bus.
async fn run_with_journal(config: SimConfig, journal_path: PathBuf) -> Result<RunOutcome> {
    let mut sim = Simulation::from_config(config)?;
    let journal = journal::spawn_journal(sim.events(), journal_path)?;

    let (report, pools) = tokio::task::spawn_blocking(move || {
        let report = sim.run().clone();
        // Dropping the simulation closes the bus and lets the journal finish.
        (report, sim.pool_stats())
    })
    .await
    .context("Simulation task panicked")?;

    let journal = journal.await.context("Event journal task panicked")??;
    Ok(RunOutcome {
        report,
        pools,
        journal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn journal_sees_every_event_of_a_run() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = SimConfig {
            duration_secs: 1.0,
            log_dir: dir.path().to_path_buf(),
            ..SimConfig::default()
        };
        let path = dir.path().join("events.jsonl");

        let outcome = run_with_journal(config, path.clone())
            .await
            .expect("run succeeds");

        assert_eq!(outcome.journal.lagged, 0);
        assert_eq!(outcome.journal.activations as u64, outcome.report.casts);
        assert_eq!(outcome.journal.releases as u64, outcome.report.releases);
        assert!(outcome.pools.iter().all(|pool| pool.total > 0));

        let text = std::fs::read_to_string(&path).expect("read journal");
        assert_eq!(text.lines().count(), outcome.journal.events);
    }
}
