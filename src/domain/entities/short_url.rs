//! Short URL entity.

use chrono::{DateTime, Utc};

/// A stored long URL together with its short code and click counter.
///
/// `short_code` is `None` only between the insert and the code assignment of
/// the two-phase create; it never changes once set.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShortUrl {
    pub id: i64,
    pub long_url: String,
    pub short_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(
        id: i64,
        long_url: String,
        short_code: Option<String>,
        created_at: DateTime<Utc>,
        clicks: i64,
    ) -> Self {
        Self {
            id,
            long_url,
            short_code,
            created_at,
            clicks,
        }
    }

    /// Short code, or an empty string while it is still unassigned.
    pub fn code(&self) -> &str {
        self.short_code.as_deref().unwrap_or_default()
    }

    /// Returns true once the short code has been assigned.
    pub fn has_code(&self) -> bool {
        self.short_code.as_deref().is_some_and(|c| !c.is_empty())
    }
}
