//! Filters for the read-only admin listing.

use chrono::{DateTime, Utc};

/// Click-count filter: entries never clicked, or clicked at least once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickedFilter {
    Never,
    AtLeastOnce,
}

/// Criteria for the admin listing. `None` fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminFilter {
    pub clicked: Option<ClickedFilter>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    /// Substring of the short code or long URL, or an exact id when numeric.
    pub search: Option<String>,
}

impl AdminFilter {
    /// Returns true if `entry` passes every set criterion.
    ///
    /// Mirrors the SQL used by the Postgres repository.
    pub fn matches(&self, entry: &super::ShortUrl) -> bool {
        let clicked_ok = match self.clicked {
            None => true,
            Some(ClickedFilter::Never) => entry.clicks == 0,
            Some(ClickedFilter::AtLeastOnce) => entry.clicks > 0,
        };

        let from_ok = self.created_from.is_none_or(|from| entry.created_at >= from);
        let to_ok = self.created_to.is_none_or(|to| entry.created_at <= to);

        let search_ok = match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let term_lc = term.to_lowercase();
                term.parse::<i64>().is_ok_and(|id| id == entry.id)
                    || entry.code().to_lowercase().contains(&term_lc)
                    || entry.long_url.to_lowercase().contains(&term_lc)
            }
        };

        clicked_ok && from_ok && to_ok && search_ok
    }
}
