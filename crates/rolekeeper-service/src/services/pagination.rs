//! Cursor pagination over the live member list

use rolekeeper_core::traits::GuildDirectory;
use rolekeeper_core::{DomainError, GuildMember, Snowflake};

/// When a listing is considered exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEnd {
    /// Stop after a page shorter than the page size
    ShortPage,
    /// Keep going until a page comes back empty
    EmptyPage,
}

/// Walks a guild's members page by page, advancing the cursor to the last
/// member seen
pub struct MemberPages<'a> {
    directory: &'a dyn GuildDirectory,
    guild_id: Snowflake,
    page_size: u32,
    end: PageEnd,
    after: Option<Snowflake>,
    done: bool,
}

impl<'a> MemberPages<'a> {
    pub fn new(
        directory: &'a dyn GuildDirectory,
        guild_id: Snowflake,
        page_size: u32,
        end: PageEnd,
    ) -> Self {
        Self {
            directory,
            guild_id,
            page_size: page_size.max(1),
            end,
            after: None,
            done: false,
        }
    }

    /// Next non-empty page, or `None` once the listing is exhausted
    pub async fn next_page(&mut self) -> Result<Option<Vec<GuildMember>>, DomainError> {
        if self.done {
            return Ok(None);
        }

        let page = self
            .directory
            .list_members(self.guild_id, self.after, self.page_size)
            .await?;

        let Some(last) = page.last() else {
            self.done = true;
            return Ok(None);
        };
        self.after = Some(last.user_id);

        if self.end == PageEnd::ShortPage && page.len() < self.page_size as usize {
            self.done = true;
        }

        Ok(Some(page))
    }
}
