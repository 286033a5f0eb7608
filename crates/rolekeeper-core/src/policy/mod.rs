//! Reconciliation policy - pure decisions for membership and role events

mod reconciliation;

pub use reconciliation::{JoinDecision, MirrorWriteDecision, PurgeDecision, ReconciliationPolicy};
