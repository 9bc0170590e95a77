use std::collections::BTreeMap;
use std::collections::btree_map;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::geo::entities::SphericalCap;

/// A schemaless record as returned by a collection.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Identity field every projection keeps.
pub const ID_FIELD: &str = "id";

pub const SELECT_KEY: &str = "select";
pub const SORT_KEY: &str = "sort";
pub const PAGE_KEY: &str = "page";
pub const LIMIT_KEY: &str = "limit";

/// Keys that shape the output and never act as filters.
pub const CONTROL_KEYS: [&str; 4] = [SELECT_KEY, SORT_KEY, PAGE_KEY, LIMIT_KEY];

/// Raw query-string pairs in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpec {
    params: Vec<(String, String)>,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a raw `a=1&b[gte]=2` query string. Undecodable input yields an empty spec.
    pub fn parse(query_string: &str) -> Self {
        let params: Vec<(String, String)> =
            serde_urlencoded::from_str(query_string).unwrap_or_default();
        Self { params }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.push((key.into(), value.into()));
    }

    /// Last value given for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn is_control_key(key: &str) -> bool {
        CONTROL_KEYS.contains(&key)
    }

    /// Every pair that is not a control key.
    pub fn filter_params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .filter(|(k, _)| !Self::is_control_key(k))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::In => "in",
        }
    }
}

impl FromStr for FilterOperator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gt" => Ok(FilterOperator::Gt),
            "gte" => Ok(FilterOperator::Gte),
            "lt" => Ok(FilterOperator::Lt),
            "lte" => Ok(FilterOperator::Lte),
            "in" => Ok(FilterOperator::In),
            _ => Err(()),
        }
    }
}

/// Condition attached to a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter {
    /// Literal match, value passed through uncoerced.
    Equals(String),
    /// Operator set, at most one value per operator.
    Compare(BTreeMap<FilterOperator, String>),
    /// Point lies inside the cap.
    WithinSphere(SphericalCap),
}

/// Split the raw value of an `in` comparison into its members.
pub fn split_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterExpression {
    fields: BTreeMap<String, FieldFilter>,
}

impl FilterExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&FieldFilter> {
        self.fields.get(field)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldFilter> {
        self.fields.iter()
    }

    /// Replace whatever condition `field` had with a literal match.
    pub fn equals(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_equals(field, value);
        self
    }

    pub fn compare(
        mut self,
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
    ) -> Self {
        self.add_comparison(field, operator, value);
        self
    }

    pub fn within_sphere(mut self, field: impl Into<String>, cap: SphericalCap) -> Self {
        self.fields
            .insert(field.into(), FieldFilter::WithinSphere(cap));
        self
    }

    pub fn set_equals(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields
            .insert(field.into(), FieldFilter::Equals(value.into()));
    }

    /// Add `operator` to the field's operator set; a previous literal or geo condition is dropped.
    pub fn add_comparison(
        &mut self,
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
    ) {
        let entry = self
            .fields
            .entry(field.into())
            .or_insert_with(|| FieldFilter::Compare(BTreeMap::new()));

        match entry {
            FieldFilter::Compare(operators) => {
                operators.insert(operator, value.into());
            }
            other => {
                *other = FieldFilter::Compare(BTreeMap::from([(operator, value.into())]));
            }
        }
    }

    /// Fold `other` into `self`; conditions in `other` win on shared fields.
    pub fn merge(&mut self, other: FilterExpression) {
        self.fields.extend(other.fields);
    }
}

impl<'a> IntoIterator for &'a FilterExpression {
    type Item = (&'a String, &'a FieldFilter);
    type IntoIter = btree_map::Iter<'a, String, FieldFilter>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Ordered sort keys, highest priority first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOrder {
    pub keys: Vec<SortKey>,
}

impl SortOrder {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Parse sort string like "field1,-field2,field3"
    pub fn from_string(s: &str) -> Self {
        let keys = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| match part.strip_prefix('-') {
                Some(field) => SortKey::desc(field.trim()),
                None => SortKey::asc(part),
            })
            .filter(|key| !key.field.is_empty())
            .collect();

        Self {
            keys: keep_last(keys, |key: &SortKey| key.field.as_str()),
        }
    }
}

/// Inclusion projection; field order is the order requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    pub fields: Vec<String>,
}

impl Projection {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        Self {
            fields: keep_last(fields, |f: &String| f.as_str()),
        }
    }

    /// Parse "name,description"
    pub fn from_string(s: &str) -> Self {
        Self::new(s.split(',').map(str::trim).filter(|f| !f.is_empty()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        field == ID_FIELD || self.fields.iter().any(|f| f == field)
    }

    /// Space separated form, e.g. "name description"
    pub fn joined(&self) -> String {
        self.fields.join(" ")
    }
}

/// Related entity to inline into each result under `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub path: String,
    pub select: Option<Projection>,
}

impl Relation {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            select: None,
        }
    }

    /// Restrict the inlined entity to whitespace separated `fields`.
    pub fn select(mut self, fields: &str) -> Self {
        let projection = Projection::new(fields.split_whitespace());
        self.select = (!projection.is_empty()).then_some(projection);
        self
    }
}

/// Everything a collection needs to materialize one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    pub filter: FilterExpression,
    pub projection: Option<Projection>,
    pub sort: Vec<SortKey>,
    pub skip: u64,
    pub limit: Option<u64>,
    pub expand: Option<Relation>,
}

impl FindQuery {
    pub fn new(filter: FilterExpression) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageRef {
    pub page: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRef>,
}

/// Largest page, limit or offset accepted; SQL backends bind these as signed 64-bit integers.
pub const MAX_PAGE_VALUE: u64 = i64::MAX as u64;

/// 1-based page and its size, both strictly positive and at most [`MAX_PAGE_VALUE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Read `page` and `limit`; anything missing, non-numeric, non-positive or above
    /// [`MAX_PAGE_VALUE`] falls back to page 1 and `default_limit`.
    pub fn from_spec(spec: &QuerySpec, default_limit: u64) -> Self {
        Self {
            page: positive(spec.get(PAGE_KEY)).unwrap_or(1),
            limit: positive(spec.get(LIMIT_KEY))
                .unwrap_or_else(|| default_limit.clamp(1, MAX_PAGE_VALUE)),
        }
    }

    /// Offset of the first item, capped at [`MAX_PAGE_VALUE`].
    pub fn start_index(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .min(MAX_PAGE_VALUE)
    }

    pub fn end_index(&self) -> u64 {
        self.page.saturating_mul(self.limit)
    }

    pub fn pagination(&self, total: u64) -> Pagination {
        Pagination {
            next: (self.end_index() < total).then_some(PageRef {
                page: self.page + 1,
                limit: self.limit,
            }),
            prev: (self.start_index() > 0).then_some(PageRef {
                page: self.page.saturating_sub(1),
                limit: self.limit,
            }),
        }
    }
}

fn positive(raw: Option<&str>) -> Option<u64> {
    raw?.trim()
        .parse::<u64>()
        .ok()
        .filter(|value| (1..=MAX_PAGE_VALUE).contains(value))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub count: usize,
    pub pagination: Pagination,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self {
            count: items.len(),
            items,
            pagination,
        }
    }
}

/// Drop earlier duplicates so the last occurrence of each key survives, in its own position.
fn keep_last<T>(items: Vec<T>, key: impl Fn(&T) -> &str) -> Vec<T> {
    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        kept.retain(|existing| key(existing) != key(&item));
        kept.push(item);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_spec_last_value_wins() {
        let spec = QuerySpec::parse("page=1&page=3&name=a");
        assert_eq!(spec.get("page"), Some("3"));
        assert_eq!(spec.get("missing"), None);
    }

    #[test]
    fn test_query_spec_filter_params_skip_control_keys() {
        let spec = QuerySpec::parse("select=name&sort=-name&page=2&limit=5&housing=true");
        let filters: Vec<_> = spec.filter_params().collect();
        assert_eq!(filters, vec![("housing", "true")]);
    }

    #[test]
    fn test_query_spec_decodes_brackets() {
        let spec = QuerySpec::parse("averageCost%5Bgte%5D=1000&careers%5Bin%5D=Business");
        assert_eq!(spec.get("averageCost[gte]"), Some("1000"));
        assert_eq!(spec.get("careers[in]"), Some("Business"));
    }

    #[test]
    fn test_sort_parse() {
        let sort = SortOrder::from_string("-createdAt, name,");
        assert_eq!(
            sort.keys,
            vec![SortKey::desc("createdAt"), SortKey::asc("name")]
        );
    }

    #[test]
    fn test_sort_duplicate_keeps_last() {
        let sort = SortOrder::from_string("name,-createdAt,-name");
        assert_eq!(
            sort.keys,
            vec![SortKey::desc("createdAt"), SortKey::desc("name")]
        );
    }

    #[test]
    fn test_projection_parse() {
        let projection = Projection::from_string("name,description,name");
        assert_eq!(projection.fields, vec!["description", "name"]);
        assert_eq!(projection.joined(), "description name");
        assert!(projection.contains("id"));
        assert!(!projection.contains("housing"));
    }

    #[test]
    fn test_relation_select() {
        let relation = Relation::new("bootcamp").select("name description");
        assert_eq!(
            relation.select,
            Some(Projection::new(["name", "description"]))
        );
        assert_eq!(Relation::new("bootcamp").select("  ").select, None);
    }

    #[test]
    fn test_comparisons_merge_per_field() {
        let filter = FilterExpression::new()
            .compare("averageCost", FilterOperator::Gte, "1000")
            .compare("averageCost", FilterOperator::Lt, "9000");

        let Some(FieldFilter::Compare(operators)) = filter.get("averageCost") else {
            panic!("expected comparison");
        };
        assert_eq!(operators.get(&FilterOperator::Gte).map(String::as_str), Some("1000"));
        assert_eq!(operators.get(&FilterOperator::Lt).map(String::as_str), Some("9000"));
    }

    #[test]
    fn test_literal_then_comparison_replaces() {
        let filter = FilterExpression::new()
            .equals("rating", "5")
            .compare("rating", FilterOperator::Gt, "3");
        assert!(matches!(filter.get("rating"), Some(FieldFilter::Compare(_))));

        let filter = filter.equals("rating", "7");
        assert_eq!(filter.get("rating"), Some(&FieldFilter::Equals("7".into())));
    }

    #[test]
    fn test_merge_scope_wins() {
        let mut filter = FilterExpression::new()
            .equals("bootcampId", "other")
            .equals("title", "Front End");
        filter.merge(FilterExpression::new().equals("bootcampId", "mine"));

        assert_eq!(filter.len(), 2);
        assert_eq!(
            filter.get("bootcampId"),
            Some(&FieldFilter::Equals("mine".into()))
        );
    }

    #[test]
    fn test_page_request_defaults() {
        let page = PageRequest::from_spec(&QuerySpec::new(), 25);
        assert_eq!(page, PageRequest { page: 1, limit: 25 });

        let page = PageRequest::from_spec(&QuerySpec::parse("page=abc&limit=0"), 25);
        assert_eq!(page, PageRequest { page: 1, limit: 25 });

        let page = PageRequest::from_spec(&QuerySpec::parse("page=-2&limit=2.5"), 25);
        assert_eq!(page, PageRequest { page: 1, limit: 25 });
    }

    #[test]
    fn test_page_request_stays_in_signed_range() {
        let page = PageRequest::from_spec(&QuerySpec::parse("limit=9223372036854775808"), 25);
        assert_eq!(page, PageRequest { page: 1, limit: 25 });

        let page = PageRequest::from_spec(
            &QuerySpec::parse("page=9223372036854775807&limit=9223372036854775807"),
            25,
        );
        assert_eq!(page.page, MAX_PAGE_VALUE);
        assert_eq!(page.start_index(), MAX_PAGE_VALUE);
        assert_eq!(page.pagination(100).next, None);
    }

    #[test]
    fn test_pagination_links() {
        let page = PageRequest { page: 2, limit: 10 };
        assert_eq!(page.start_index(), 10);
        assert_eq!(
            page.pagination(25),
            Pagination {
                next: Some(PageRef { page: 3, limit: 10 }),
                prev: Some(PageRef { page: 1, limit: 10 }),
            }
        );

        let last = PageRequest { page: 3, limit: 10 };
        assert_eq!(
            last.pagination(25),
            Pagination {
                next: None,
                prev: Some(PageRef { page: 2, limit: 10 }),
            }
        );

        let only = PageRequest { page: 1, limit: 25 };
        assert_eq!(only.pagination(25), Pagination::default());
    }

    #[test]
    fn test_pagination_omits_absent_links() {
        let json = serde_json::to_value(Pagination {
            next: Some(PageRef { page: 2, limit: 25 }),
            prev: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "next": { "page": 2, "limit": 25 } }));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("Business, UI/UX,,"), vec!["Business", "UI/UX"]);
    }
}
