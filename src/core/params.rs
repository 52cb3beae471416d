//! Page request parameters as they arrive from a query string

use crate::core::error::{PaginateError, PaginateResult};
use crate::core::paginator::PaginateOptions;
use crate::core::query::{PaginateFilter, SortOrder};
use serde::Deserialize;
use std::str::FromStr;

/// Query parameters for a keyset page request
///
/// All parameters have defaults, so an empty query string is a valid
/// first-page request.
///
/// # Example
/// ```rust,ignore
/// // In handler:
/// pub async fn list_orders(
///     Query(params): Query<PageParams>,
/// ) -> Result<Json<Page<Order>>, PaginateError> {
///     let options = params.into_options::<i64>()?;
///     Ok(Json(paginator.next_page(&orders, options).await?))
/// }
///
/// // Usage:
/// GET /orders?limit=10
/// GET /orders?limit=10&cursor=1042&order=desc
/// GET /orders?filter={"status": "open"}&cursor=1042
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageParams {
    /// Number of items per page (not clamped; the paginator rejects values <= 0)
    pub limit: i64,

    /// Identifier of the last item of the previous page
    pub cursor: Option<String>,

    /// `asc` / `ascending` or `desc` / `descending`
    pub order: Option<String>,

    /// Filter as a JSON object in query syntax
    ///
    /// # Example
    /// ```text
    /// filter={"status": "active", "amount": {"$gt": 100}}
    /// ```
    pub filter: Option<String>,
}

fn default_limit() -> i64 {
    20
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            cursor: None,
            order: None,
            filter: None,
        }
    }
}

impl PageParams {
    /// Parse the sort direction, `None` when absent
    pub fn order(&self) -> PaginateResult<Option<SortOrder>> {
        match self.order.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => SortOrder::parse(raw).map(Some).ok_or_else(|| {
                PaginateError::invalid_argument(
                    "order",
                    format!("unknown sort order '{}', expected 'asc' or 'desc'", raw),
                )
            }),
        }
    }

    /// Parse the filter JSON string, an empty filter when absent
    pub fn filter_value(&self) -> PaginateResult<PaginateFilter> {
        let Some(raw) = self.filter.as_deref().filter(|s| !s.trim().is_empty()) else {
            return Ok(PaginateFilter::new());
        };

        let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
            PaginateError::invalid_argument("filter", format!("invalid filter JSON: {}", e))
        })?;

        PaginateFilter::try_from(value).map_err(|_| {
            PaginateError::invalid_argument("filter", "filter must be a JSON object")
        })
    }

    /// Parse the cursor into the collection's identifier type
    pub fn cursor<I>(&self) -> PaginateResult<Option<I>>
    where
        I: FromStr,
        I::Err: std::fmt::Display,
    {
        match self.cursor.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<I>().map(Some).map_err(|e| {
                PaginateError::invalid_argument("cursor", format!("invalid cursor '{}': {}", raw, e))
            }),
        }
    }

    /// Convert into a page request
    pub fn into_options<I>(self) -> PaginateResult<PaginateOptions<I>>
    where
        I: FromStr,
        I::Err: std::fmt::Display,
    {
        Ok(PaginateOptions {
            filter: self.filter_value()?,
            limit: self.limit,
            projection: None,
            cursor: self.cursor()?,
            order: self.order()?,
        })
    }
}
