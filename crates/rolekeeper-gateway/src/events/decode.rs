//! Decoding of dispatch payloads into guild events
//!
//! This is the single place where raw gateway JSON turns into typed
//! [`GuildEvent`]s.

use rolekeeper_core::events::{
    GuildEvent, GuildRoleDeletedEvent, MemberJoinedEvent, MemberRolesUpdatedEvent,
    ReactionAddedEvent,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::event_types::GatewayEventType;
use super::payloads::{
    DispatchFrame, GuildMemberAddPayload, GuildMemberUpdatePayload, GuildRoleDeletePayload,
    MessageReactionAddPayload,
};

/// Payload decoding errors
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed frame: {0}")]
    Frame(#[source] serde_json::Error),

    #[error("Malformed {event} payload: {source}")]
    Payload {
        event: GatewayEventType,
        #[source]
        source: serde_json::Error,
    },
}

/// Decode one dispatch event.
///
/// Event names the engine does not consume, and reactions outside a guild,
/// decode to `Ok(None)`.
pub fn decode_dispatch(
    event_name: &str,
    data: serde_json::Value,
) -> Result<Option<GuildEvent>, DecodeError> {
    let Some(event_type) = GatewayEventType::parse(event_name) else {
        return Ok(None);
    };

    let event = match event_type {
        GatewayEventType::GuildMemberAdd => {
            let p: GuildMemberAddPayload = payload(event_type, data)?;
            MemberJoinedEvent::new(p.guild_id, p.user.id, p.roles).into()
        }
        GatewayEventType::GuildMemberUpdate => {
            let p: GuildMemberUpdatePayload = payload(event_type, data)?;
            MemberRolesUpdatedEvent::new(p.guild_id, p.user.id, p.roles.into_iter().collect())
                .into()
        }
        GatewayEventType::GuildRoleDelete => {
            let p: GuildRoleDeletePayload = payload(event_type, data)?;
            GuildRoleDeletedEvent::new(p.guild_id, p.role_id).into()
        }
        GatewayEventType::MessageReactionAdd => {
            let p: MessageReactionAddPayload = payload(event_type, data)?;
            let (Some(guild_id), Some(emoji)) = (p.guild_id, p.emoji.key()) else {
                return Ok(None);
            };
            ReactionAddedEvent::new(guild_id, p.channel_id, p.message_id, p.user_id, emoji).into()
        }
    };

    Ok(Some(event))
}

/// Decode a raw gateway frame; non-dispatch frames yield `Ok(None)`
pub fn decode_frame(raw: &str) -> Result<Option<GuildEvent>, DecodeError> {
    let frame: DispatchFrame = serde_json::from_str(raw).map_err(DecodeError::Frame)?;

    match (frame.op, frame.t) {
        (DispatchFrame::DISPATCH, Some(name)) => decode_dispatch(&name, frame.d),
        _ => Ok(None),
    }
}

fn payload<T: DeserializeOwned>(
    event: GatewayEventType,
    data: serde_json::Value,
) -> Result<T, DecodeError> {
    serde_json::from_value(data).map_err(|source| DecodeError::Payload { event, source })
}
