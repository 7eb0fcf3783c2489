//! In-memory list querying over loosely-shaped records
//!
//! List views hold whatever the backend returned as JSON records and narrow
//! them down locally: free-text search, per-field filters, a single sort key
//! and fixed-size pages. Every function here is total over any record shape;
//! missing or oddly typed fields simply do not match (or sort last).

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::types::{PaginatedResponse, Pagination, SortOrder, SortParams};

/// Resolve a dotted path (`service.name`, `images.0`) inside a record
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(record, |current, segment| match current {
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => current.get(segment),
    })
}

/// Keep records where any of `fields` matches `term`
///
/// Matching is case-insensitive: either the field contains the term as a
/// substring, or every word of the term is a prefix of some word in the
/// field. An empty term keeps everything.
pub fn search<S: AsRef<str>>(records: Vec<Value>, term: &str, fields: &[S]) -> Vec<Value> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| {
            fields.iter().any(|field| {
                lookup(record, field.as_ref())
                    .and_then(searchable_text)
                    .map_or(false, |text| matches_term(&text, &term))
            })
        })
        .collect()
}

fn searchable_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.to_lowercase()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn matches_term(text: &str, term: &str) -> bool {
    if text.contains(term) {
        return true;
    }
    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    term.split_whitespace()
        .all(|part| words.iter().any(|word| word.starts_with(part)))
}

/// A single filter condition on one field
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCriterion {
    /// Field must equal the value (scalars also compare by their text form)
    Equals(Value),
    /// Field, parsed as a float, must lie within the inclusive bounds
    Range { min: Option<f64>, max: Option<f64> },
}

impl FilterCriterion {
    /// Interpret a raw criterion; `{min, max}`-shaped objects become ranges
    pub fn from_value(value: Value) -> Self {
        if let Value::Object(map) = &value {
            let range_shaped =
                !map.is_empty() && map.keys().all(|k| k == "min" || k == "max");
            if range_shaped {
                return FilterCriterion::Range {
                    min: map.get("min").and_then(numeric),
                    max: map.get("max").and_then(numeric),
                };
            }
        }
        FilterCriterion::Equals(value)
    }

    /// Whether `record` satisfies this criterion on `field`
    pub fn matches(&self, record: &Value, field: &str) -> bool {
        let actual = lookup(record, field);
        match self {
            FilterCriterion::Equals(Value::Null) => actual.map_or(true, Value::is_null),
            FilterCriterion::Equals(expected) => {
                actual.map_or(false, |actual| scalars_equal(actual, expected))
            }
            FilterCriterion::Range { min, max } => match actual.and_then(numeric) {
                Some(n) => min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m),
                None => false,
            },
        }
    }
}

fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn scalars_equal(actual: &Value, expected: &Value) -> bool {
    if actual == expected {
        return true;
    }
    match (scalar_text(actual), scalar_text(expected)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Keep records satisfying every criterion
pub fn filter(records: Vec<Value>, criteria: &BTreeMap<String, FilterCriterion>) -> Vec<Value> {
    if criteria.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| {
            criteria
                .iter()
                .all(|(field, criterion)| criterion.matches(record, field))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Bool(_) => 1,
            SortKey::Text(_) => 2,
        }
    }

    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn sort_key(record: &Value, field: &str) -> Option<SortKey> {
    let value = lookup(record, field)?;
    if field == "date" {
        return parse_timestamp(value).map(SortKey::Number);
    }
    match value {
        Value::Number(n) => n.as_f64().map(SortKey::Number),
        Value::String(s) => Some(SortKey::Text(s.to_lowercase())),
        Value::Bool(b) => Some(SortKey::Bool(*b)),
        _ => None,
    }
}

/// Milliseconds since the epoch for the date shapes the backend emits
fn parse_timestamp(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.timestamp_millis() as f64);
            }
            for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
                if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                    return Some(dt.and_utc().timestamp_millis() as f64);
                }
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc().timestamp_millis() as f64)
        }
        _ => None,
    }
}

/// Stable sort on one field
///
/// Records whose field is missing, null or unparseable always come after
/// the others, in both directions. Text compares case-insensitively and a
/// field named `date` compares as a timestamp.
pub fn sort(records: Vec<Value>, params: &SortParams) -> Vec<Value> {
    let mut keyed: Vec<(Option<SortKey>, Value)> = records
        .into_iter()
        .map(|record| (sort_key(&record, &params.field), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match params.order {
            SortOrder::Asc => a.compare(b),
            SortOrder::Desc => a.compare(b).reverse(),
        },
    });

    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Fixed-size, 1-indexed page window
pub fn paginate<T>(records: Vec<T>, page: u32, page_size: u32) -> PaginatedResponse<T> {
    PaginatedResponse::from_items(records, Pagination::new(page, page_size))
}

/// The search/filter/sort/page state of one list view
///
/// Changing the search term, a filter, the sort or the page size sends the
/// view back to page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    search_term: String,
    search_fields: Vec<String>,
    filters: BTreeMap<String, FilterCriterion>,
    sort: Option<SortParams>,
    pagination: Pagination,
}

impl ListQuery {
    pub fn new<I, S>(search_fields: I, page_size: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search_term: String::new(),
            search_fields: search_fields.into_iter().map(Into::into).collect(),
            filters: BTreeMap::new(),
            sort: None,
            pagination: Pagination::new(1, page_size),
        }
    }

    pub fn page(&self) -> u32 {
        self.pagination.page
    }

    pub fn page_size(&self) -> u32 {
        self.pagination.per_page
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.reset_page();
    }

    pub fn set_filter(&mut self, field: impl Into<String>, criterion: FilterCriterion) {
        self.filters.insert(field.into(), criterion);
        self.reset_page();
    }

    pub fn clear_filter(&mut self, field: &str) {
        if self.filters.remove(field).is_some() {
            self.reset_page();
        }
    }

    pub fn set_sort(&mut self, sort: Option<SortParams>) {
        self.sort = sort;
        self.reset_page();
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.pagination = Pagination::new(1, page_size);
    }

    pub fn set_page(&mut self, page: u32) {
        self.pagination = Pagination::new(page, self.pagination.per_page);
    }

    fn reset_page(&mut self) {
        self.pagination = self.pagination.reset();
    }

    /// Run search, filter, sort and pagination, in that order
    pub fn apply(&self, records: &[Value]) -> PaginatedResponse<Value> {
        let matched = search(records.to_vec(), &self.search_term, &self.search_fields);
        let filtered = filter(matched, &self.filters);
        let ordered = match &self.sort {
            Some(params) => sort(filtered, params),
            None => filtered,
        };
        PaginatedResponse::from_items(ordered, self.pagination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn services() -> Vec<Value> {
        vec![
            json!({"name": "Wedding Decor", "cost": 1200, "category": "wedding", "service": {"name": "Stage"}}),
            json!({"name": "Home Decor", "cost": "450.5", "category": "home"}),
            json!({"name": "birthday balloons", "cost": null, "category": "party"}),
        ]
    }

    #[test]
    fn test_search_prefix_word() {
        let result = search(
            vec![json!({"name": "Wedding Decor"}), json!({"name": "Home Decor"})],
            "wed",
            &["name"],
        );
        assert_eq!(result, vec![json!({"name": "Wedding Decor"})]);
    }

    #[test]
    fn test_search_empty_term_keeps_all() {
        assert_eq!(search(services(), "   ", &["name"]).len(), 3);
    }

    #[test]
    fn test_search_dotted_path_and_multi_word() {
        let by_nested = search(services(), "stage", &["service.name"]);
        assert_eq!(by_nested.len(), 1);

        let multi = search(services(), "hom dec", &["name"]);
        assert_eq!(multi, vec![services()[1].clone()]);
    }

    #[test]
    fn test_filter_equality_and_range() {
        let mut criteria = BTreeMap::new();
        criteria.insert(
            "category".to_string(),
            FilterCriterion::Equals(json!("home")),
        );
        assert_eq!(filter(services(), &criteria).len(), 1);

        let mut range = BTreeMap::new();
        range.insert(
            "cost".to_string(),
            FilterCriterion::from_value(json!({"min": 400, "max": "1000"})),
        );
        let result = filter(services(), &range);
        assert_eq!(result, vec![services()[1].clone()]);
    }

    #[test]
    fn test_range_never_matches_non_numeric() {
        let criterion = FilterCriterion::Range { min: None, max: None };
        assert!(!criterion.matches(&json!({"cost": null}), "cost"));
        assert!(!criterion.matches(&json!({"cost": "call us"}), "cost"));
        assert!(!criterion.matches(&json!({}), "cost"));
        assert!(criterion.matches(&json!({"cost": 3}), "cost"));
    }

    #[test]
    fn test_from_value_only_treats_min_max_objects_as_ranges() {
        assert_eq!(
            FilterCriterion::from_value(json!({"min": 1})),
            FilterCriterion::Range { min: Some(1.0), max: None }
        );
        assert_eq!(
            FilterCriterion::from_value(json!({"min": 1, "label": "x"})),
            FilterCriterion::Equals(json!({"min": 1, "label": "x"}))
        );
    }

    #[test]
    fn test_sort_nulls_last_both_directions() {
        let asc = sort(services(), &SortParams::asc("cost"));
        assert_eq!(asc[2]["name"], "birthday balloons");

        let desc = sort(services(), &SortParams::desc("cost"));
        assert_eq!(desc[2]["name"], "birthday balloons");
    }

    #[test]
    fn test_sort_text_case_insensitive() {
        let sorted = sort(services(), &SortParams::asc("name"));
        let names: Vec<&str> = sorted.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["birthday balloons", "Home Decor", "Wedding Decor"]);
    }

    #[test]
    fn test_sort_date_field_as_timestamp() {
        let records = vec![
            json!({"id": 1, "date": "2024-03-10T10:00:00Z"}),
            json!({"id": 2, "date": "2024-01-05"}),
            json!({"id": 3, "date": "not a date"}),
            json!({"id": 4, "date": "2024-02-01T08:30:00.000Z"}),
        ];
        let sorted = sort(records, &SortParams::asc("date"));
        let ids: Vec<i64> = sorted.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_sort_is_stable() {
        let records = vec![
            json!({"id": 1, "k": "a"}),
            json!({"id": 2, "k": "A"}),
            json!({"id": 3, "k": "a"}),
        ];
        let sorted = sort(records, &SortParams::desc("k"));
        let ids: Vec<i64> = sorted.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_paginate_law() {
        let records: Vec<Value> = (0..17).map(|i| json!({ "i": i })).collect();
        let first = paginate(records.clone(), 1, 4);
        assert_eq!(first.total_pages, 5);

        let rebuilt: Vec<Value> = (1..=first.total_pages)
            .flat_map(|page| paginate(records.clone(), page, 4).data)
            .collect();
        assert_eq!(rebuilt, records);
    }

    #[test]
    fn test_list_query_resets_page_on_change() {
        let mut query = ListQuery::new(["name"], 1);
        query.set_page(3);
        assert_eq!(query.page(), 3);

        query.set_search("decor");
        assert_eq!(query.page(), 1);

        query.set_page(2);
        query.set_filter("category", FilterCriterion::Equals(json!("home")));
        assert_eq!(query.page(), 1);

        query.set_page(2);
        query.set_sort(Some(SortParams::asc("name")));
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn test_list_query_apply_pipeline() {
        let mut query = ListQuery::new(["name"], 1);
        query.set_search("decor");
        query.set_sort(Some(SortParams::desc("name")));

        let page = query.apply(&services());
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.data[0]["name"], "Wedding Decor");

        query.set_page(2);
        let page = query.apply(&services());
        assert_eq!(page.data[0]["name"], "Home Decor");
    }
}
