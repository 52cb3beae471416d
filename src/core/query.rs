//! Range query description handed to a query executor
//!
//! A [`RangeQuery`] is the only thing the paginator produces. It describes
//! *what* to fetch (filter, identifier bound, limit, projection, sort) and
//! owns no documents; the executor decides how to run it.

use crate::core::document::Identifier;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Sort direction on the identifier field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest identifier first
    #[default]
    #[serde(alias = "asc")]
    Ascending,

    /// Largest identifier first
    #[serde(alias = "desc")]
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }

    /// Returns true if results are ordered smallest identifier first
    pub fn is_ascending(&self) -> bool {
        matches!(self, SortOrder::Ascending)
    }

    /// The `1` / `-1` direction used by ordered-index sort documents.
    pub(crate) fn index_direction(&self) -> i32 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }

    /// Parse a user supplied direction (`asc`, `ascending`, `desc`, `descending`)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortOrder::Ascending),
            "desc" | "descending" => Some(SortOrder::Descending),
            _ => None,
        }
    }
}

/// Predicate over document fields, in MongoDB query syntax
///
/// The identifier field does not belong here: the paginator drops any entry
/// for it, at the top level or inside `$and`, and substitutes its own cursor
/// bound. Identifier conditions nested in `$or` or `$nor` are passed on
/// unchanged.
///
/// # Format
/// - Equality: `{"status": "active"}`
/// - Operators: `{"amount": {"$gte": 100}}`, `{"tag": {"$in": ["a", "b"]}}`
/// - Logical: `{"$or": [{"status": "open"}, {"priority": {"$gt": 3}}]}`
///
/// The filter is not validated; malformed expressions are reported by the
/// executor that runs them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaginateFilter(Map<String, Value>);

impl PaginateFilter {
    /// An empty filter matching every document
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition on `field`, replacing any previous condition on it
    pub fn with(mut self, field: impl Into<String>, condition: impl Into<Value>) -> Self {
        self.0.insert(field.into(), condition.into());
        self
    }

    /// Get the condition on a field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Copy of this filter without any condition on `field`
    ///
    /// Conditions are removed at the top level and inside `$and` clauses,
    /// which are conjunctive with it. `$or` and `$nor` clauses are kept as
    /// written, since dropping a branch changes which documents match.
    pub(crate) fn without_field(&self, field: &str) -> Self {
        Self(strip_field(&self.0, field))
    }
}

fn strip_field(map: &Map<String, Value>, field: &str) -> Map<String, Value> {
    let mut stripped = Map::new();

    for (key, condition) in map {
        if key == field {
            continue;
        }

        if let ("$and", Some(clauses)) = (key.as_str(), condition.as_array()) {
            let kept: Vec<Value> = clauses
                .iter()
                .filter_map(|clause| match clause {
                    Value::Object(inner) => {
                        let inner = strip_field(inner, field);
                        (!inner.is_empty()).then_some(Value::Object(inner))
                    }
                    other => Some(other.clone()),
                })
                .collect();

            // an `$and` left with no clauses constrained only the identifier
            if !kept.is_empty() || clauses.is_empty() {
                stripped.insert(key.clone(), Value::Array(kept));
            }
            continue;
        }

        stripped.insert(key.clone(), condition.clone());
    }

    stripped
}

impl From<Map<String, Value>> for PaginateFilter {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for PaginateFilter {
    type Error = Value;

    /// Accepts a JSON object; any other value is handed back unchanged.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

/// Field selection applied to returned documents
///
/// - Inclusion: `{"name": 1, "email": 1}`
/// - Exclusion: `{"password_hash": 0}`
///
/// Passed to the executor untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Projection(Map<String, Value>);

impl Projection {
    /// Keep only the given fields (plus the identifier)
    pub fn include<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            fields
                .into_iter()
                .map(|f| (f.into(), Value::from(1)))
                .collect(),
        )
    }

    /// Drop the given fields
    pub fn exclude<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            fields
                .into_iter()
                .map(|f| (f.into(), Value::from(0)))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Projection {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Exclusive bound on the identifier derived from a cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdBound<I> {
    /// identifier > cursor
    GreaterThan(I),
    /// identifier < cursor
    LessThan(I),
}

impl<I: Identifier> IdBound<I> {
    /// The bound that continues a page walk in `order` after `cursor`
    pub fn after(cursor: I, order: SortOrder) -> Self {
        match order {
            SortOrder::Ascending => IdBound::GreaterThan(cursor),
            SortOrder::Descending => IdBound::LessThan(cursor),
        }
    }

    /// The cursor value this bound was built from
    pub fn cursor(&self) -> &I {
        match self {
            IdBound::GreaterThan(c) | IdBound::LessThan(c) => c,
        }
    }

    /// Comparison operator name in query syntax (`$gt` / `$lt`)
    pub fn operator(&self) -> &'static str {
        match self {
            IdBound::GreaterThan(_) => "$gt",
            IdBound::LessThan(_) => "$lt",
        }
    }

    /// Returns true if `id` lies strictly beyond the cursor
    pub fn contains(&self, id: &I) -> bool {
        match self {
            IdBound::GreaterThan(c) => id.cmp(c) == Ordering::Greater,
            IdBound::LessThan(c) => id.cmp(c) == Ordering::Less,
        }
    }
}

/// Effective filter: the caller's predicate AND the optional cursor bound
#[derive(Debug, Clone, PartialEq)]
pub struct CursorFilter<I> {
    filter: PaginateFilter,
    bound: Option<IdBound<I>>,
}

impl<I: Identifier> CursorFilter<I> {
    pub(crate) fn new(filter: PaginateFilter, bound: Option<IdBound<I>>) -> Self {
        Self { filter, bound }
    }

    /// The caller's predicate over non-identifier fields
    pub fn filter(&self) -> &PaginateFilter {
        &self.filter
    }

    /// The cursor bound, `None` on a first page
    pub fn bound(&self) -> Option<&IdBound<I>> {
        self.bound.as_ref()
    }

    /// Render as a single JSON query document
    ///
    /// The bound is written as `{identifier_field: {"$gt" | "$lt": cursor}}`.
    pub fn to_value(&self, identifier_field: &str) -> serde_json::Result<Value> {
        let mut map = self.filter.as_map().clone();
        if let Some(bound) = &self.bound {
            let mut op = Map::new();
            op.insert(
                bound.operator().to_string(),
                serde_json::to_value(bound.cursor())?,
            );
            map.insert(identifier_field.to_string(), Value::Object(op));
        }
        Ok(Value::Object(map))
    }
}

/// Sort specification: the identifier field and a direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

/// A bounded range query over the identifier index
///
/// Built only by the [`Paginator`](crate::core::paginator::Paginator), so the
/// limit is always positive and the identifier is constrained only by the
/// cursor bound.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery<I> {
    filter: CursorFilter<I>,
    limit: i64,
    projection: Option<Projection>,
    sort: SortSpec,
}

impl<I: Identifier> RangeQuery<I> {
    pub(crate) fn new(
        filter: CursorFilter<I>,
        limit: i64,
        projection: Option<Projection>,
        sort: SortSpec,
    ) -> Self {
        Self {
            filter,
            limit,
            projection,
            sort,
        }
    }

    pub fn filter(&self) -> &CursorFilter<I> {
        &self.filter
    }

    /// Maximum number of documents, equal to the requested page size
    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    /// Name of the identifier field the query is sorted and bounded on
    pub fn identifier_field(&self) -> &str {
        &self.sort.field
    }

    pub fn order(&self) -> SortOrder {
        self.sort.order
    }
}
