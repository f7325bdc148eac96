//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::SkillEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Activation and release of effect instances
    Lifecycle,
    /// Engagements, applied hits and shown damage texts
    Combat,
}

/// Topic-based event bus
///
/// Cloning shares the underlying channels.
#[derive(Debug, Clone)]
pub struct EventBus {
    lifecycle: broadcast::Sender<SkillEvent>,
    combat: broadcast::Sender<SkillEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lifecycle: broadcast::channel(capacity).0,
            combat: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<SkillEvent> {
        match topic {
            Topic::Lifecycle => &self.lifecycle,
            Topic::Combat => &self.combat,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: SkillEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(target: "skill::events", ?topic, "No subscribers for topic");
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<SkillEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<SkillEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.sender(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectKey;
    use crate::events::ReleaseReason;
    use crate::pool::PoolHandle;
    use skill_core::TargetId;

    fn key() -> EffectKey {
        EffectKey::new(0, PoolHandle(0))
    }

    #[test]
    fn events_route_to_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut lifecycle = bus.subscribe(Topic::Lifecycle);
        let mut combat = bus.subscribe(Topic::Combat);

        bus.publish(SkillEvent::TargetEngaged {
            key: key(),
            activation: 1,
            target: TargetId(3),
        });
        bus.publish(SkillEvent::EffectReleased {
            key: key(),
            activation: 1,
            reason: ReleaseReason::Expired,
        });

        assert!(matches!(
            combat.try_recv(),
            Ok(SkillEvent::TargetEngaged { target: TargetId(3), .. })
        ));
        assert!(combat.try_recv().is_err());
        assert!(matches!(
            lifecycle.try_recv(),
            Ok(SkillEvent::EffectReleased { reason: ReleaseReason::Expired, .. })
        ));
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::default();
        assert_eq!(bus.subscriber_count(Topic::Combat), 0);
        bus.publish(SkillEvent::TargetEngaged {
            key: key(),
            activation: 1,
            target: TargetId(1),
        });

        let clone = bus.clone();
        let _rx = clone.subscribe(Topic::Combat);
        assert_eq!(bus.subscriber_count(Topic::Combat), 1);
    }
}
