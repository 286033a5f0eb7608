//! Bulk role assignment
//!
//! Grants one role to every member of a guild that does not hold it yet,
//! spacing the live grants to stay under the platform's rate limits.

use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use rolekeeper_core::{GuildMember, Snowflake};
use tracing::{info, instrument, warn};

use super::context::{ServiceContext, MAX_PAGE_SIZE};
use super::error::ServiceResult;
use super::pagination::{MemberPages, PageEnd};

/// Tally of a bulk assignment run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkAssignReport {
    pub members: usize,
    pub already_held: usize,
    pub granted: usize,
    pub failed: usize,
}

/// Bulk role assigner
pub struct BulkRoleAssigner<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BulkRoleAssigner<'a> {
    /// Create a new BulkRoleAssigner
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Grant `role_id` to every member lacking it.
    ///
    /// The whole member list is collected first; a listing failure aborts
    /// before any grant is made. Individual grant failures are counted.
    #[instrument(skip(self))]
    pub async fn assign_role_to_all(
        &self,
        guild_id: Snowflake,
        role_id: Snowflake,
    ) -> ServiceResult<BulkAssignReport> {
        let members = self.collect_members(guild_id).await?;
        let limiter = spacing_limiter(self.ctx.settings().bulk_assign_interval);

        let mut report = BulkAssignReport {
            members: members.len(),
            ..BulkAssignReport::default()
        };

        for member in members {
            if member.has_role(role_id) {
                report.already_held += 1;
                continue;
            }

            if let Some(limiter) = &limiter {
                limiter.until_ready().await;
            }

            match self
                .ctx
                .role_mutator()
                .grant_role(guild_id, member.user_id, role_id)
                .await
            {
                Ok(()) => report.granted += 1,
                Err(e) => {
                    warn!(user_id = %member.user_id, error = %e, "Bulk grant failed");
                    report.failed += 1;
                }
            }
        }

        info!(
            members = report.members,
            granted = report.granted,
            already_held = report.already_held,
            failed = report.failed,
            "Bulk role assignment finished"
        );
        Ok(report)
    }

    async fn collect_members(&self, guild_id: Snowflake) -> ServiceResult<Vec<GuildMember>> {
        let mut pages = MemberPages::new(
            self.ctx.directory(),
            guild_id,
            MAX_PAGE_SIZE,
            PageEnd::EmptyPage,
        );

        let mut members = Vec::new();
        while let Some(page) = pages.next_page().await? {
            members.extend(page);
        }
        Ok(members)
    }
}

/// One grant per `interval`; `None` when the interval is zero
fn spacing_limiter(interval: Duration) -> Option<DefaultDirectRateLimiter> {
    Quota::with_period(interval).map(RateLimiter::direct)
}
