//! Sharded event dispatch

mod dispatcher;

pub use dispatcher::{shard_for, EventDispatcher, DEFAULT_QUEUE_CAPACITY};
