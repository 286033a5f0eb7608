//! Ephemeral toggle notices

use std::sync::Arc;
use std::time::Duration;

use rolekeeper_core::entities::NOTICE_COLOR;
use rolekeeper_core::traits::MessagingSurface;
use rolekeeper_core::{Embed, PostedMessage, Snowflake};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub const NOTICE_TITLE: &str = "Role Update";

/// Notice telling a member which role was toggled
pub fn toggle_notice(
    user_id: Snowflake,
    role_id: Snowflake,
    granted: bool,
    ttl: Duration,
) -> Embed {
    let description = if granted {
        format!("<@{user_id}> I have given the role <@&{role_id}> to you.")
    } else {
        format!("<@{user_id}> I have removed the role <@&{role_id}> from you.")
    };

    Embed::new(NOTICE_TITLE, description, NOTICE_COLOR).with_footer(format!(
        "This message will be deleted in {}",
        describe_ttl(ttl)
    ))
}

fn describe_ttl(ttl: Duration) -> String {
    if ttl.subsec_millis() == 0 && ttl.as_secs() > 0 {
        let secs = ttl.as_secs();
        format!("{secs} second{}", if secs == 1 { "" } else { "s" })
    } else {
        format!("{} ms", ttl.as_millis())
    }
}

/// Delete `message` after `ttl` on a detached task.
///
/// The deletion always fires; dropping the handle does not cancel it.
pub fn schedule_deletion(
    messaging: Arc<dyn MessagingSurface>,
    message: PostedMessage,
    ttl: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(ttl).await;
        match messaging
            .delete_message(message.channel_id, message.message_id)
            .await
        {
            Ok(()) => debug!(message_id = %message.message_id, "Notice deleted"),
            Err(e) => {
                warn!(message_id = %message.message_id, error = %e, "Failed to delete notice")
            }
        }
    })
}
