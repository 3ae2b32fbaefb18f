//! Room event fan-out
//!
//! Infallible by contract: the triggering write has already committed, so
//! delivery and queue failures are logged and swallowed. A per-room lock
//! serializes frame handoff so connections observe events in publish
//! order; handoff never awaits a consumer, and notification enqueues run
//! after the lock is released, so a stalled client cannot stall the
//! publisher.

use crate::connection::ConnectionManager;
use crate::protocol::GatewayMessage;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use tutor_core::traits::{NotificationJob, NotificationQueue, RoomEventSink};
use tutor_core::{RoomEvent, Snowflake};

/// Fans room events out to live connections and the notification queue
pub struct RoomFanout {
    manager: Arc<ConnectionManager>,
    queue: Arc<dyn NotificationQueue>,
    room_locks: DashMap<Snowflake, Arc<Mutex<()>>>,
}

impl RoomFanout {
    /// Create a new fan-out over the given connection manager and queue
    pub fn new(manager: Arc<ConnectionManager>, queue: Arc<dyn NotificationQueue>) -> Self {
        Self {
            manager,
            queue,
            room_locks: DashMap::new(),
        }
    }

    fn room_lock(&self, room_id: Snowflake) -> Arc<Mutex<()>> {
        self.room_locks.entry(room_id).or_default().clone()
    }

    #[cfg(test)]
    fn room_lock_count(&self) -> usize {
        self.room_locks.len()
    }
}

#[async_trait]
impl RoomEventSink for RoomFanout {
    async fn publish(&self, room_id: Snowflake, recipients: &[Snowflake], event: RoomEvent) {
        let lock = self.room_lock(room_id);
        let live = {
            let _ordering = lock.lock().await;

            let connections = self.manager.room_connections(room_id);
            let mut live: HashSet<Snowflake> = HashSet::new();

            for connection in &connections {
                live.insert(connection.user_id());

                let frame = GatewayMessage::event(connection.next_sequence(), &event);
                match connection.try_send(frame) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        // The consumer has stopped draining its buffer;
                        // the sequence gap lets it detect the loss
                        warn!(
                            session_id = %connection.session_id(),
                            room_id = %room_id,
                            "Outgoing buffer full; frame dropped"
                        );
                    }
                    Err(TrySendError::Closed(_)) => {
                        // The connection is being torn down concurrently;
                        // its cleanup removes it from the manager
                        debug!(
                            session_id = %connection.session_id(),
                            room_id = %room_id,
                            "Dropped frame for closing connection"
                        );
                    }
                }
            }

            if connections.is_empty() {
                self.room_locks.remove(&room_id);
            }

            live
        };

        // Enqueues run outside the ordering lock
        for recipient in recipients {
            if live.contains(recipient) {
                continue;
            }

            let job = NotificationJob::for_event(*recipient, &event);
            if let Err(e) = self.queue.enqueue(job).await {
                warn!(
                    room_id = %room_id,
                    recipient_id = %recipient,
                    error = %e,
                    "Notification enqueue failed; job dropped"
                );
            }
        }
    }
}

impl std::fmt::Debug for RoomFanout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomFanout")
            .field("manager", &self.manager)
            .finish()
    }
}
