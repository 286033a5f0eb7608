//! Guild syncer
//!
//! Rewrites the mirror from the live member list. Used to seed the mirror on
//! first deployment and to heal drift after missed events.

use rolekeeper_core::Snowflake;
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::pagination::{MemberPages, PageEnd};

/// Guild syncer
pub struct GuildSyncer<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GuildSyncer<'a> {
    /// Create a new GuildSyncer
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mirror every member that holds at least one role.
    ///
    /// Returns how many members' mirrors were rewritten. A failed write for one
    /// member is logged and skipped; a failed listing aborts the sync.
    #[instrument(skip(self))]
    pub async fn sync_guild(&self, guild_id: Snowflake) -> ServiceResult<usize> {
        let page_size = self.ctx.settings().effective_page_size();
        let mut pages =
            MemberPages::new(self.ctx.directory(), guild_id, page_size, PageEnd::ShortPage);

        let mut seen = 0usize;
        let mut mirrored = 0usize;
        let mut failed = 0usize;

        while let Some(page) = pages.next_page().await? {
            seen += page.len();

            for member in page {
                if member.role_ids.is_empty() {
                    continue;
                }

                match self
                    .ctx
                    .mirror()
                    .replace_roles(member.user_id, guild_id, &member.role_set())
                    .await
                {
                    Ok(()) => mirrored += 1,
                    Err(e) => {
                        warn!(user_id = %member.user_id, error = %e, "Failed to sync member roles");
                        failed += 1;
                    }
                }
            }

            debug!(seen, mirrored, "Sync page done");
        }

        info!(seen, mirrored, failed, "Guild sync finished");
        Ok(mirrored)
    }
}
