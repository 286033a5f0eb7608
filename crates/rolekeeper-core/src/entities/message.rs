//! Message types exchanged with the messaging surface

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Embed colour of the reaction roles control message
pub const CONTROL_MESSAGE_COLOR: u32 = 0x00FF_FF;
/// Embed colour of toggle notices
pub const NOTICE_COLOR: u32 = 0x00FF_CC;

/// Rich embed posted to a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl Embed {
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            footer: None,
        }
    }

    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

/// Handle of a message the messaging surface accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostedMessage {
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
}

impl PostedMessage {
    pub fn new(channel_id: Snowflake, message_id: Snowflake) -> Self {
        Self {
            channel_id,
            message_id,
        }
    }
}
