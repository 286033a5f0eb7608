//! Gateway events
//!
//! Wire payloads of the dispatch events the role engine consumes and their
//! decoding into [`GuildEvent`](rolekeeper_core::GuildEvent).

mod decode;
mod event_types;
mod payloads;

pub use decode::{decode_dispatch, decode_frame, DecodeError};
pub use event_types::GatewayEventType;
pub use payloads::{
    DispatchFrame, EmojiPayload, GuildMemberAddPayload, GuildMemberUpdatePayload,
    GuildRoleDeletePayload, MessageReactionAddPayload, UserIdPayload,
};
