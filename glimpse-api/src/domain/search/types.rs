//! Core types for the image search domain.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum::{Display, EnumString};
use time::{Duration, OffsetDateTime};

use crate::domain::models::UserId;

/// An immutable record of one successfully served search.
///
/// `id` and `timestamp` are assigned by the store at insert time; `user_id`
/// and `term` are fixed at creation.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    pub id: i64,
    pub user_id: UserId,
    pub term: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// A term with its occurrence count across all users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct TermCount {
    pub term: String,
    pub count: i64,
}

/// One image descriptor returned to the client, in provider order.
///
/// Field names follow the provider payload so clients can render results
/// without remapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResult {
    pub id: String,
    pub urls: ImageUrls,
    pub alt_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrls {
    pub small: String,
    pub regular: Option<String>,
    pub thumb: Option<String>,
}

/// Relative time window scoping a history deletion.
///
/// A window deletes the *recent* slice: records with
/// `timestamp >= now - window`. [`TimeWindow::All`] deletes everything the
/// user owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum TimeWindow {
    #[strum(serialize = "1hour")]
    OneHour,
    #[strum(serialize = "24hours")]
    TwentyFourHours,
    #[strum(serialize = "7days")]
    SevenDays,
    #[strum(serialize = "all")]
    All,
}

impl TimeWindow {
    /// Parse a client-supplied `timeRange` value. Absent and unrecognized
    /// values both mean "all"; the unrecognized case is logged, matching the
    /// lenient contract of the delete endpoint.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => TimeWindow::All,
            Some(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!("Unrecognized timeRange '{}', treating as 'all'", value);
                TimeWindow::All
            }),
        }
    }

    /// The absolute cutoff for this window, or `None` when the whole history
    /// is in scope.
    pub fn cutoff(&self, now: OffsetDateTime) -> Option<OffsetDateTime> {
        match self {
            TimeWindow::OneHour => Some(now - Duration::hours(1)),
            TimeWindow::TwentyFourHours => Some(now - Duration::hours(24)),
            TimeWindow::SevenDays => Some(now - Duration::days(7)),
            TimeWindow::All => None,
        }
    }
}
