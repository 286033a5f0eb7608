//! Event dispatcher
//!
//! Routes decoded guild events to a fixed set of shard workers. Every event
//! with the same ordering key lands on the same worker, so one member's events
//! are handled one at a time and in arrival order, while different members
//! proceed concurrently.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use rolekeeper_core::GuildEvent;
use rolekeeper_service::{
    EventIngestor, ReactionRoleSession, ReactionToggleController, ServiceContext, ServiceError,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::error::GatewayError;

/// Per-shard queue capacity; `dispatch` waits when a shard is full
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

struct Envelope {
    seq: u64,
    event: GuildEvent,
}

/// Shard worker pool
pub struct EventDispatcher {
    senders: Vec<mpsc::Sender<Envelope>>,
    workers: Vec<JoinHandle<()>>,
    /// Sequence number for events
    sequence: AtomicU64,
}

/// Shard index for an event among `shards` workers
pub fn shard_for(event: &GuildEvent, shards: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    event.ordering_key().hash(&mut hasher);
    (hasher.finish() % shards.max(1) as u64) as usize
}

impl EventDispatcher {
    /// Spawn `shards` workers (at least one) sharing `ctx` and `session`
    pub fn start(ctx: ServiceContext, session: Arc<ReactionRoleSession>, shards: usize) -> Self {
        Self::with_capacity(ctx, session, shards, DEFAULT_QUEUE_CAPACITY)
    }

    pub fn with_capacity(
        ctx: ServiceContext,
        session: Arc<ReactionRoleSession>,
        shards: usize,
        capacity: usize,
    ) -> Self {
        let shards = shards.max(1);
        let mut senders = Vec::with_capacity(shards);
        let mut workers = Vec::with_capacity(shards);

        for shard in 0..shards {
            let (tx, rx) = mpsc::channel(capacity.max(1));
            senders.push(tx);
            workers.push(tokio::spawn(run_shard(
                shard,
                rx,
                ctx.clone(),
                Arc::clone(&session),
            )));
        }

        info!(shards, "Event dispatcher started");

        Self {
            senders,
            workers,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn shard_count(&self) -> usize {
        self.senders.len()
    }

    /// Queue an event on its shard; returns the assigned sequence number
    pub async fn dispatch(&self, event: GuildEvent) -> Result<u64, GatewayError> {
        let shard = shard_for(&event, self.senders.len());
        let seq = self.next_sequence();

        trace!(seq, shard, event_type = event.event_type(), "Dispatching event");

        self.senders[shard]
            .send(Envelope { seq, event })
            .await
            .map_err(|_| GatewayError::DispatcherClosed)?;

        Ok(seq)
    }

    /// Close every queue and wait until the workers drain them
    pub async fn shutdown(self) {
        drop(self.senders);

        for result in join_all(self.workers).await {
            if let Err(e) = result {
                warn!(error = %e, "Shard worker ended abnormally");
            }
        }

        info!("Event dispatcher stopped");
    }

    /// Get the next sequence number
    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }
}

async fn run_shard(
    shard: usize,
    mut rx: mpsc::Receiver<Envelope>,
    ctx: ServiceContext,
    session: Arc<ReactionRoleSession>,
) {
    while let Some(Envelope { seq, event }) = rx.recv().await {
        if let Err(e) = handle_event(&ctx, &session, &event).await {
            warn!(
                seq,
                shard,
                event_type = event.event_type(),
                error = %e,
                code = e.error_code(),
                "Event handling failed"
            );
        }
    }

    debug!(shard, "Shard worker finished");
}

async fn handle_event(
    ctx: &ServiceContext,
    session: &ReactionRoleSession,
    event: &GuildEvent,
) -> Result<(), ServiceError> {
    match event {
        GuildEvent::MemberJoined(e) => {
            EventIngestor::new(ctx).handle_member_join(e).await?;
        }
        GuildEvent::MemberRolesUpdated(e) => {
            EventIngestor::new(ctx).handle_member_role_set_changed(e).await?;
        }
        GuildEvent::RoleDeleted(e) => {
            EventIngestor::new(ctx).handle_guild_role_deleted(e).await?;
        }
        GuildEvent::ReactionAdded(e) => {
            let outcome = ReactionToggleController::new(ctx)
                .handle_reaction_added(e, session)
                .await;
            trace!(?outcome, "Reaction handled");
        }
    }
    Ok(())
}
