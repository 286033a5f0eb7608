//! Domain entities

mod member;
mod message;
mod reaction_role;

pub use member::GuildMember;
pub use message::{Embed, PostedMessage, CONTROL_MESSAGE_COLOR, NOTICE_COLOR};
pub use reaction_role::ReactionRoleDefinition;
