//! # rolekeeper-gateway
//!
//! Entry point for live gateway traffic: decodes dispatch payloads into guild
//! events, fans them out over ordered shard workers and runs the engine's
//! startup sequence.

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod events;

pub use dispatch::EventDispatcher;
pub use engine::RoleEngine;
pub use error::GatewayError;
pub use events::{decode_dispatch, decode_frame, DecodeError};
