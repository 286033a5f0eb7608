//! Database models - SQLx-compatible structs for the mirror tables

mod member_join;
mod sticky_role;

pub use member_join::MemberJoinModel;
pub use sticky_role::StickyRoleModel;
