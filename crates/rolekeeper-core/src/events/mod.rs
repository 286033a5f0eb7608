//! Guild events consumed by the role engine

mod guild_event;

pub use guild_event::{
    GuildEvent, GuildRoleDeletedEvent, MemberJoinedEvent, MemberKey, MemberRolesUpdatedEvent,
    ReactionAddedEvent,
};
