//! Display models shared by the page templates.

use crate::domain::entities::ShortUrl;
use crate::utils::request_host::RequestHost;

const CREATED_FORMAT: &str = "%d.%m.%Y %H:%M:%S UTC";

/// One entry, preformatted for rendering.
#[derive(Debug, Clone)]
pub struct EntryView {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    /// Absolute short link when the request host is known, `/{code}/` otherwise.
    pub short_link: String,
    pub clicks: i64,
    pub created: String,
}

impl EntryView {
    pub fn new(entry: &ShortUrl, host: Option<&RequestHost>) -> Self {
        let code = entry.code().to_string();
        let short_link = match host {
            Some(host) => host.short_link(&code),
            None => format!("/{code}/"),
        };

        Self {
            id: entry.id,
            long_url: entry.long_url.clone(),
            short_link,
            clicks: entry.clicks,
            created: entry.created_at.format(CREATED_FORMAT).to_string(),
            code,
        }
    }

    pub fn list(entries: &[ShortUrl], host: Option<&RequestHost>) -> Vec<Self> {
        entries.iter().map(|e| Self::new(e, host)).collect()
    }
}
