//! Event journal: appends every skill event to a JSON-lines file.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use skill_runtime::{EventBus, SkillEvent, Topic};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::warn;

/// Counts gathered while journaling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalSummary {
    pub events: usize,
    pub activations: usize,
    pub engagements: usize,
    pub hits_applied: usize,
    pub texts_shown: usize,
    pub releases: usize,
    pub lagged: u64,
}

impl JournalSummary {
    pub fn record(&mut self, event: &SkillEvent) {
        self.events += 1;
        match event {
            SkillEvent::EffectActivated { .. } => self.activations += 1,
            SkillEvent::TargetEngaged { .. } => self.engagements += 1,
            SkillEvent::DamageApplied { .. } => self.hits_applied += 1,
            SkillEvent::DamageTextShown { .. } => self.texts_shown += 1,
            SkillEvent::EffectReleased { .. } => self.releases += 1,
        }
    }
}

/// Subscribes to every topic and journals until the bus is dropped.
pub fn spawn_journal(bus: &EventBus, path: PathBuf) -> Result<JoinHandle<Result<JournalSummary>>> {
    let file = File::create(&path)
        .with_context(|| format!("Failed to create event journal {}", path.display()))?;
    let lifecycle = bus.subscribe(Topic::Lifecycle);
    let combat = bus.subscribe(Topic::Combat);

    Ok(tokio::spawn(run_journal(BufWriter::new(file), lifecycle, combat)))
}

async fn run_journal<W: Write>(
    mut out: W,
    mut lifecycle: broadcast::Receiver<SkillEvent>,
    mut combat: broadcast::Receiver<SkillEvent>,
) -> Result<JournalSummary> {
    let mut summary = JournalSummary::default();
    let mut lifecycle_open = true;
    let mut combat_open = true;

    while lifecycle_open || combat_open {
        let received = tokio::select! {
            result = lifecycle.recv(), if lifecycle_open => (Topic::Lifecycle, result),
            result = combat.recv(), if combat_open => (Topic::Combat, result),
        };

        match received {
            (_, Ok(event)) => {
                serde_json::to_writer(&mut out, &event)?;
                out.write_all(b"\n")?;
                summary.record(&event);
            }
            (topic, Err(RecvError::Lagged(skipped))) => {
                warn!(target: "skill::journal", ?topic, skipped, "Journal lagged behind");
                summary.lagged += skipped;
            }
            (Topic::Lifecycle, Err(RecvError::Closed)) => lifecycle_open = false,
            (Topic::Combat, Err(RecvError::Closed)) => combat_open = false,
        }
    }

    out.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_core::TargetId;
    use skill_runtime::{EffectKey, PoolHandle, ReleaseReason};

    fn key() -> EffectKey {
        EffectKey::new(0, PoolHandle(2))
    }

    #[tokio::test]
    async fn journal_writes_one_line_per_event() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("events.jsonl");
        let bus = EventBus::with_capacity(16);

        let handle = spawn_journal(&bus, path.clone()).expect("journal");
        bus.publish(SkillEvent::TargetEngaged {
            key: key(),
            activation: 1,
            target: TargetId(4),
        });
        bus.publish(SkillEvent::EffectReleased {
            key: key(),
            activation: 1,
            reason: ReleaseReason::Completed,
        });
        drop(bus);

        let summary = handle.await.expect("join").expect("journal result");
        assert_eq!(summary.events, 2);
        assert_eq!(summary.engagements, 1);
        assert_eq!(summary.releases, 1);

        let text = std::fs::read_to_string(&path).expect("read journal");
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("TargetEngaged"));
    }
}
