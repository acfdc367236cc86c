//! Save notifications for views that list declarations.
//!
//! A list view subscribes and refreshes when a declaration it shows was created or
//! updated, instead of polling a process-wide flag.

use crate::EventsConfig;
use parlance_core::Dialect;
use tokio::sync::broadcast;
use tracing::debug;

/// Something happened to a stored declaration.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum DeclarationEvent {
    /// A new declaration was stored
    #[display("created {} {}", dialect, id)]
    Created {
        /// Backend-assigned id
        id: String,
        /// Dialect of the declaration
        dialect: Dialect,
    },
    /// An existing declaration was replaced
    #[display("updated {} {}", dialect, id)]
    Updated {
        /// Backend-assigned id
        id: String,
        /// Dialect of the declaration
        dialect: Dialect,
    },
}

impl DeclarationEvent {
    /// Dialect of the affected declaration.
    pub fn dialect(&self) -> Dialect {
        match self {
            DeclarationEvent::Created { dialect, .. } | DeclarationEvent::Updated { dialect, .. } => {
                *dialect
            }
        }
    }

    /// Id of the affected declaration.
    pub fn id(&self) -> &str {
        match self {
            DeclarationEvent::Created { id, .. } | DeclarationEvent::Updated { id, .. } => id,
        }
    }
}

/// In-process fan-out of [`DeclarationEvent`]s over a tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct DeclarationEvents {
    tx: broadcast::Sender<DeclarationEvent>,
}

impl DeclarationEvents {
    /// Create a bus with the given channel capacity (at least 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Create a bus from configuration.
    pub fn from_config(config: &EventsConfig) -> Self {
        Self::new(*config.capacity())
    }

    /// Publish to all current subscribers. Having none is not an error.
    pub fn publish(&self, event: DeclarationEvent) {
        debug!(%event, "Publishing declaration event");
        if self.tx.send(event).is_err() {
            debug!("No subscribers for declaration event");
        }
    }

    /// Subscribe to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DeclarationEvent> {
        self.tx.subscribe()
    }
}

impl Default for DeclarationEvents {
    fn default() -> Self {
        Self::from_config(&EventsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let events = DeclarationEvents::new(4);
        let mut rx = events.subscribe();

        events.publish(DeclarationEvent::Created {
            id: "1".to_string(),
            dialect: Dialect::Rule,
        });

        let event = rx.recv().await.unwrap();
        assert_eq!(event.id(), "1");
        assert_eq!(event.dialect(), Dialect::Rule);
    }

    #[test]
    fn test_publish_without_subscribers_is_ok() {
        let events = DeclarationEvents::new(0);
        events.publish(DeclarationEvent::Updated {
            id: "1".to_string(),
            dialect: Dialect::Story,
        });
    }
}
