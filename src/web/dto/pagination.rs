//! Query parameters of the listing pages.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use serde_json::json;
use serde_with::{NoneAsEmptyString, serde_as};

use crate::domain::entities::{AdminFilter, ClickedFilter};
use crate::error::AppError;

/// Default page size of the admin listing.
pub const ADMIN_DEFAULT_PAGE_SIZE: u32 = 100;

/// `GET /list/` query.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<u32>,
}

impl ListQuery {
    /// Requested page, defaulting to the first.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

/// `GET /admin/` query: pagination plus filters.
///
/// Empty strings, as sent by an untouched HTML form field, count as absent.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page_size: Option<u32>,

    /// `never` or `once`.
    #[serde(default)]
    pub clicked: Option<String>,

    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    #[serde(default)]
    pub from: Option<String>,

    /// RFC 3339 timestamp or `YYYY-MM-DD` (inclusive, to the end of that day).
    #[serde(default)]
    pub to: Option<String>,

    #[serde(default)]
    pub q: Option<String>,
}

impl AdminQuery {
    /// Validates paging and returns `(page, page_size)`.
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Page size must be between 10 and 1000
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] on out-of-range values.
    pub fn paging(&self) -> Result<(u32, u32), AppError> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(ADMIN_DEFAULT_PAGE_SIZE);

        if page == 0 {
            return Err(AppError::bad_request(
                "Page must be greater than 0",
                json!({ "page": page }),
            ));
        }

        if !(10..=1000).contains(&page_size) {
            return Err(AppError::bad_request(
                "Page size must be between 10 and 1000",
                json!({ "page_size": page_size }),
            ));
        }

        Ok((page, page_size))
    }

    /// Builds the repository filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] for an unknown `clicked` value or an
    /// unparsable date.
    pub fn filter(&self) -> Result<AdminFilter, AppError> {
        let clicked = match non_empty(&self.clicked) {
            None => None,
            Some("never") => Some(ClickedFilter::Never),
            Some("once") => Some(ClickedFilter::AtLeastOnce),
            Some(other) => {
                return Err(AppError::bad_request(
                    "clicked must be 'never' or 'once'",
                    json!({ "clicked": other }),
                ));
            }
        };

        Ok(AdminFilter {
            clicked,
            created_from: non_empty(&self.from)
                .map(|s| parse_bound(s, false))
                .transpose()?,
            created_to: non_empty(&self.to)
                .map(|s| parse_bound(s, true))
                .transpose()?,
            search: non_empty(&self.q).map(str::to_string),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Parses an RFC 3339 timestamp, or a bare date as the start (or end) of that day in UTC.
fn parse_bound(value: &str, end_of_day: bool) -> Result<DateTime<Utc>, AppError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::bad_request(
            "Dates must be RFC 3339 or YYYY-MM-DD",
            json!({ "value": value }),
        )
    })?;

    let time = if end_of_day {
        NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)
    }
    .ok_or_else(|| AppError::internal("Invalid time of day", json!({})))?;

    Ok(date.and_time(time).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn query(pairs: &str) -> AdminQuery {
        serde_json::from_str(pairs).unwrap()
    }

    #[test]
    fn test_list_query_defaults_to_first_page() {
        assert_eq!(ListQuery::default().page(), 1);
        let q: ListQuery = serde_json::from_str(r#"{"page": ""}"#).unwrap();
        assert_eq!(q.page(), 1);
        let q: ListQuery = serde_json::from_str(r#"{"page": "3"}"#).unwrap();
        assert_eq!(q.page(), 3);
    }

    #[test]
    fn test_list_query_rejects_garbage() {
        assert!(serde_json::from_str::<ListQuery>(r#"{"page": "last"}"#).is_err());
    }

    #[test]
    fn test_paging_defaults() {
        assert_eq!(AdminQuery::default().paging().unwrap(), (1, 100));
    }

    #[test]
    fn test_paging_bounds() {
        assert!(query(r#"{"page": "0"}"#).paging().is_err());
        assert!(query(r#"{"page_size": "9"}"#).paging().is_err());
        assert!(query(r#"{"page_size": "1001"}"#).paging().is_err());
        assert_eq!(
            query(r#"{"page": "2", "page_size": "10"}"#).paging().unwrap(),
            (2, 10)
        );
    }

    #[test]
    fn test_filter_empty_fields_are_ignored() {
        let filter = query(r#"{"clicked": "", "from": "", "to": " ", "q": ""}"#)
            .filter()
            .unwrap();
        assert_eq!(filter, AdminFilter::default());
    }

    #[test]
    fn test_filter_clicked_values() {
        assert_eq!(
            query(r#"{"clicked": "never"}"#).filter().unwrap().clicked,
            Some(ClickedFilter::Never)
        );
        assert_eq!(
            query(r#"{"clicked": "once"}"#).filter().unwrap().clicked,
            Some(ClickedFilter::AtLeastOnce)
        );
        assert!(query(r#"{"clicked": "twice"}"#).filter().is_err());
    }

    #[test]
    fn test_filter_dates() {
        let filter = query(r#"{"from": "2024-03-01", "to": "2024-03-31"}"#)
            .filter()
            .unwrap();

        let from = filter.created_from.unwrap();
        let to = filter.created_to.unwrap();
        assert_eq!((from.day(), from.hour()), (1, 0));
        assert_eq!((to.day(), to.hour(), to.minute()), (31, 23, 59));

        let filter = query(r#"{"from": "2024-03-01T12:00:00+02:00"}"#)
            .filter()
            .unwrap();
        assert_eq!(filter.created_from.unwrap().hour(), 10);

        assert!(query(r#"{"from": "yesterday"}"#).filter().is_err());
    }
}
