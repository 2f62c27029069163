//! Query compiler for the HubSpot CRM Search API.
//!
//! Lowers a boolean filter-expression tree (`{left, op, right}` nodes nested
//! via AND/OR) plus field selection and ordering into the JSON body the
//! search endpoint expects: `filterGroups` of `filters`, `properties`,
//! `limit`, and optional `sorts`. Groups in `filterGroups` are OR'ed by
//! HubSpot; filters within one group are AND'ed, so the lowering produces a
//! disjunctive-normal-form shape.
//!
//! An AND node takes the first filter group from each side; AND is not
//! distributed over nested OR groups, so deeply mixed AND-over-OR trees
//! collapse to the first group of each branch. Full boolean normalization is
//! out of scope here.
//!
//! Pure and synchronous: no I/O, no shared state, safe to call from any
//! number of threads.

use connector_common::{ConnectorError, OrderBy};
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

/// Maximum page size the search endpoint supports; every compiled body
/// requests exactly this many rows.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Comparison operator tokens recognized in filter leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Equal,
    NotEqual,
    LessThanOrEqual,
    LessThan,
    GreaterThanOrEqual,
    GreaterThan,
    In,
    NotIn,
    Between,
    Like,
    NotLike,
}

impl FromStr for FilterOperator {
    type Err = ConnectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(FilterOperator::Equal),
            "!=" => Ok(FilterOperator::NotEqual),
            "<=" => Ok(FilterOperator::LessThanOrEqual),
            "<" => Ok(FilterOperator::LessThan),
            ">=" => Ok(FilterOperator::GreaterThanOrEqual),
            ">" => Ok(FilterOperator::GreaterThan),
            "IN" => Ok(FilterOperator::In),
            "NOTIN" => Ok(FilterOperator::NotIn),
            "BETWEEN" => Ok(FilterOperator::Between),
            "LIKE" => Ok(FilterOperator::Like),
            "NOTLIKE" => Ok(FilterOperator::NotLike),
            _ => Err(ConnectorError::InvalidOperator(s.to_string())),
        }
    }
}

impl FilterOperator {
    /// The operator string the search endpoint understands.
    pub fn as_hubspot_operator(&self) -> &'static str {
        match self {
            FilterOperator::Equal => "EQ",
            FilterOperator::NotEqual => "NEQ",
            FilterOperator::LessThanOrEqual => "LTE",
            FilterOperator::LessThan => "LT",
            FilterOperator::GreaterThanOrEqual => "GTE",
            FilterOperator::GreaterThan => "GT",
            FilterOperator::In => "IN",
            FilterOperator::NotIn => "NOT_IN",
            FilterOperator::Between => "BETWEEN",
            FilterOperator::Like => "CONTAINS_TOKEN",
            FilterOperator::NotLike => "NOT_CONTAINS_TOKEN",
        }
    }
}

/// A single comparison condition: field, operator, and the value carried
/// verbatim (string, number, or an ordered pair for range operators).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub field: String,
    pub op: FilterOperator,
    pub value: Value,
}

/// Boolean filter-expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    Leaf(FilterClause),
    And(Box<FilterExpression>, Box<FilterExpression>),
    Or(Box<FilterExpression>, Box<FilterExpression>),
}

enum Side {
    Left,
    Right,
}

impl Side {
    fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

impl FilterExpression {
    /// Parses an expression node: either a leaf
    /// `{left: <string>, op: <token>, right: <value>}` or an internal node
    /// `{left: <expr>, op: "AND"|"OR", right: <expr>}` (AND/OR recognized
    /// case-insensitively).
    pub fn from_value(node: &Value) -> Result<Self, ConnectorError> {
        let obj = node.as_object().ok_or_else(|| {
            ConnectorError::AbortedOperation(
                "Filter expression should be a JSON object".to_string(),
            )
        })?;

        let op = obj.get("op").and_then(Value::as_str).ok_or_else(|| {
            ConnectorError::AbortedOperation(
                "Filter expression is missing an 'op' token".to_string(),
            )
        })?;

        match op.to_uppercase().as_str() {
            "AND" => Ok(FilterExpression::And(
                Box::new(Self::operand(obj.get("left"), Side::Left)?),
                Box::new(Self::operand(obj.get("right"), Side::Right)?),
            )),
            "OR" => Ok(FilterExpression::Or(
                Box::new(Self::operand(obj.get("left"), Side::Left)?),
                Box::new(Self::operand(obj.get("right"), Side::Right)?),
            )),
            _ => {
                let field = obj.get("left").and_then(Value::as_str).ok_or_else(|| {
                    ConnectorError::AbortedOperation(
                        "Filter clause 'left' should be a field name".to_string(),
                    )
                })?;
                let value = obj.get("right").cloned().ok_or_else(|| {
                    ConnectorError::AbortedOperation(
                        "Filter clause is missing a 'right' value".to_string(),
                    )
                })?;
                Ok(FilterExpression::Leaf(FilterClause {
                    field: field.to_string(),
                    op: op.parse()?,
                    value,
                }))
            }
        }
    }

    /// An AND/OR operand must itself be an expression object. A leaf object
    /// is valid (it becomes a one-filter group under OR, or contributes one
    /// filter under AND); anything else is a malformed tree.
    fn operand(value: Option<&Value>, side: Side) -> Result<Self, ConnectorError> {
        match value {
            Some(node @ Value::Object(_)) => Self::from_value(node),
            _ => Err(ConnectorError::AbortedOperation(format!(
                "{} key should contain an array",
                side.as_str()
            ))),
        }
    }
}

/// One condition in the compiled body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    #[serde(rename = "propertyName")]
    pub property_name: String,
    pub operator: String,
    pub value: Value,
}

/// AND-combined set of filters; groups are OR-combined by the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterGroup {
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sort {
    #[serde(rename = "propertyName")]
    pub property_name: String,
    pub direction: SortDirection,
}

/// The compiled search request body.
///
/// Serializes to exactly the keys the endpoint expects: `filterGroups`,
/// `properties`, `limit`, then `sorts` — with `sorts` omitted entirely (not
/// an empty array) when no ordering was requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    #[serde(rename = "filterGroups")]
    pub filter_groups: Vec<FilterGroup>,
    pub properties: Vec<String>,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorts: Option<Vec<Sort>>,
}

impl SearchRequest {
    /// Compiles an already-parsed expression tree. Infallible: malformed
    /// shapes and unknown operators are rejected at parse time.
    pub fn compile(
        expr: &FilterExpression,
        select_fields: &[String],
        order_by: &OrderBy,
    ) -> Self {
        Self::assemble(lower(expr), select_fields, order_by)
    }

    fn assemble(
        filter_groups: Vec<FilterGroup>,
        select_fields: &[String],
        order_by: &OrderBy,
    ) -> Self {
        let sorts = match &order_by.column {
            Some(column) if !column.is_empty() => Some(vec![Sort {
                property_name: column.clone(),
                direction: if order_by.ascending {
                    SortDirection::Ascending
                } else {
                    SortDirection::Descending
                },
            }]),
            _ => None,
        };

        SearchRequest {
            filter_groups,
            properties: select_fields.to_vec(),
            limit: MAX_PAGE_SIZE,
            sorts,
        }
    }
}

/// Recursive lowering into DNF-shaped groups.
fn lower(expr: &FilterExpression) -> Vec<FilterGroup> {
    match expr {
        FilterExpression::Leaf(clause) => vec![FilterGroup {
            filters: vec![format_clause(clause)],
        }],
        FilterExpression::Or(left, right) => {
            let mut groups = lower(left);
            groups.extend(lower(right));
            groups
        }
        FilterExpression::And(left, right) => {
            // Each side is assumed to resolve to a single group; nested OR
            // groups past the first are dropped rather than distributed.
            let mut filters = first_group_filters(lower(left));
            filters.extend(first_group_filters(lower(right)));
            vec![FilterGroup { filters }]
        }
    }
}

fn first_group_filters(groups: Vec<FilterGroup>) -> Vec<Filter> {
    groups
        .into_iter()
        .next()
        .map(|group| group.filters)
        .unwrap_or_default()
}

fn format_clause(clause: &FilterClause) -> Filter {
    Filter {
        property_name: clause.field.clone(),
        operator: clause.op.as_hubspot_operator().to_string(),
        value: clause.value.clone(),
    }
}

/// Builds a search request body from the raw caller-supplied query JSON
/// (`{"where": {...}}`), the select-field list, and the ordering.
///
/// An absent or null `where` yields zero filter groups; callers treat that
/// as "no search performed".
pub fn build_search_request(
    query: &Value,
    select_fields: &[String],
    order_by: &OrderBy,
) -> Result<SearchRequest, ConnectorError> {
    let filter_groups = match query.get("where") {
        Some(where_clause) if !where_clause.is_null() => {
            lower(&FilterExpression::from_value(where_clause)?)
        }
        _ => Vec::new(),
    };

    Ok(SearchRequest::assemble(
        filter_groups,
        select_fields,
        order_by,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_operator_table() {
        let table = [
            ("=", "EQ"),
            ("!=", "NEQ"),
            ("<=", "LTE"),
            ("<", "LT"),
            (">=", "GTE"),
            (">", "GT"),
            ("IN", "IN"),
            ("NOTIN", "NOT_IN"),
            ("BETWEEN", "BETWEEN"),
            ("LIKE", "CONTAINS_TOKEN"),
            ("NOTLIKE", "NOT_CONTAINS_TOKEN"),
        ];
        for (token, expected) in table {
            let op: FilterOperator = token.parse().unwrap();
            assert_eq!(op.as_hubspot_operator(), expected, "token {}", token);
        }
    }

    #[test]
    fn test_unknown_operator_rejected() {
        for token in ["0", "eq", "like", "<>", ""] {
            let err = FilterOperator::from_str(token).unwrap_err();
            assert!(
                matches!(err, ConnectorError::InvalidOperator(ref t) if t == token),
                "token {:?} gave {:?}",
                token,
                err
            );
        }
    }

    #[test]
    fn test_simple_where_clause() {
        let query = json!({"where": {"left": "domain", "op": "=", "right": "example.com"}});
        let body =
            build_search_request(&query, &fields(&["domain", "name"]), &OrderBy::default())
                .unwrap();

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "filterGroups": [
                    {"filters": [
                        {"propertyName": "domain", "operator": "EQ", "value": "example.com"}
                    ]}
                ],
                "properties": ["domain", "name"],
                "limit": 100
            })
        );
    }

    #[test]
    fn test_and_clause_single_group() {
        let query = json!({"where": {
            "left": {"left": "domain", "op": "=", "right": "example.com"},
            "op": "AND",
            "right": {"left": "name", "op": "=", "right": "example"}
        }});
        let body =
            build_search_request(&query, &fields(&["domain", "name"]), &OrderBy::default())
                .unwrap();

        assert_eq!(body.filter_groups.len(), 1);
        assert_eq!(
            serde_json::to_value(&body.filter_groups).unwrap(),
            json!([
                {"filters": [
                    {"propertyName": "domain", "operator": "EQ", "value": "example.com"},
                    {"propertyName": "name", "operator": "EQ", "value": "example"}
                ]}
            ])
        );
    }

    #[test]
    fn test_or_clause_two_groups() {
        // A plain leaf on either side of OR is valid and becomes its own
        // one-filter group.
        let query = json!({"where": {
            "left": {"left": "domain", "op": "=", "right": "example.com"},
            "op": "OR",
            "right": {"left": "name", "op": "=", "right": "example"}
        }});
        let body =
            build_search_request(&query, &fields(&["domain", "name"]), &OrderBy::default())
                .unwrap();

        assert_eq!(
            serde_json::to_value(&body.filter_groups).unwrap(),
            json!([
                {"filters": [
                    {"propertyName": "domain", "operator": "EQ", "value": "example.com"}
                ]},
                {"filters": [
                    {"propertyName": "name", "operator": "EQ", "value": "example"}
                ]}
            ])
        );
    }

    #[test]
    fn test_logical_tokens_case_insensitive() {
        let query = json!({"where": {
            "left": {"left": "a", "op": "=", "right": "1"},
            "op": "or",
            "right": {"left": "b", "op": "=", "right": "2"}
        }});
        let body = build_search_request(&query, &[], &OrderBy::default()).unwrap();
        assert_eq!(body.filter_groups.len(), 2);

        let query = json!({"where": {
            "left": {"left": "a", "op": "=", "right": "1"},
            "op": "and",
            "right": {"left": "b", "op": "=", "right": "2"}
        }});
        let body = build_search_request(&query, &[], &OrderBy::default()).unwrap();
        assert_eq!(body.filter_groups.len(), 1);
        assert_eq!(body.filter_groups[0].filters.len(), 2);
    }

    #[test]
    fn test_between_value_passes_through() {
        let query = json!({"where": {
            "left": "createdate",
            "op": "BETWEEN",
            "right": ["2023-01-01", "2023-12-31"]
        }});
        let body =
            build_search_request(&query, &fields(&["createdate"]), &OrderBy::default()).unwrap();

        let filter = &body.filter_groups[0].filters[0];
        assert_eq!(filter.operator, "BETWEEN");
        assert_eq!(filter.value, json!(["2023-01-01", "2023-12-31"]));
    }

    #[test]
    fn test_nested_or_of_or_three_groups() {
        let query = json!({"where": {
            "left": {
                "left": {"left": "a", "op": "=", "right": "1"},
                "op": "OR",
                "right": {"left": "b", "op": "=", "right": "2"}
            },
            "op": "OR",
            "right": {"left": "c", "op": "=", "right": "3"}
        }});
        let body = build_search_request(&query, &[], &OrderBy::default()).unwrap();

        assert_eq!(body.filter_groups.len(), 3);
        let names: Vec<&str> = body
            .filter_groups
            .iter()
            .map(|g| g.filters[0].property_name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_nested_and_of_and_single_group() {
        let query = json!({"where": {
            "left": {
                "left": {"left": "a", "op": "=", "right": "1"},
                "op": "AND",
                "right": {"left": "b", "op": "=", "right": "2"}
            },
            "op": "AND",
            "right": {"left": "c", "op": "=", "right": "3"}
        }});
        let body = build_search_request(&query, &[], &OrderBy::default()).unwrap();

        assert_eq!(body.filter_groups.len(), 1);
        assert_eq!(body.filter_groups[0].filters.len(), 3);
    }

    #[test]
    fn test_or_of_and_keeps_both_groups() {
        let query = json!({"where": {
            "left": {
                "left": {"left": "a", "op": "=", "right": "1"},
                "op": "AND",
                "right": {"left": "b", "op": "=", "right": "2"}
            },
            "op": "OR",
            "right": {"left": "c", "op": "=", "right": "3"}
        }});
        let body = build_search_request(&query, &[], &OrderBy::default()).unwrap();

        assert_eq!(body.filter_groups.len(), 2);
        assert_eq!(body.filter_groups[0].filters.len(), 2);
        assert_eq!(body.filter_groups[1].filters.len(), 1);
    }

    #[test]
    fn test_order_by_omitted_when_unset() {
        let query = json!({"where": {"left": "domain", "op": "=", "right": "example.com"}});
        let body = build_search_request(&query, &[], &OrderBy::default()).unwrap();

        let serialized = serde_json::to_value(&body).unwrap();
        // Omitted entirely, not an empty array.
        assert!(serialized.get("sorts").is_none());
    }

    #[test]
    fn test_order_by_directions() {
        let query = json!({"where": {"left": "domain", "op": "=", "right": "example.com"}});

        let body =
            build_search_request(&query, &[], &OrderBy::new("createdate", true)).unwrap();
        assert_eq!(
            serde_json::to_value(&body.sorts).unwrap(),
            json!([{"propertyName": "createdate", "direction": "ASCENDING"}])
        );

        let body =
            build_search_request(&query, &[], &OrderBy::new("createdate", false)).unwrap();
        assert_eq!(
            serde_json::to_value(&body.sorts).unwrap(),
            json!([{"propertyName": "createdate", "direction": "DESCENDING"}])
        );
    }

    #[test]
    fn test_limit_is_always_max_page_size() {
        let query = json!({"where": {"left": "domain", "op": "=", "right": "example.com"}});
        let body = build_search_request(&query, &[], &OrderBy::default()).unwrap();
        assert_eq!(body.limit, 100);

        let body = build_search_request(&json!({}), &[], &OrderBy::default()).unwrap();
        assert_eq!(body.limit, 100);
    }

    #[test]
    fn test_missing_or_null_where_yields_no_groups() {
        let body = build_search_request(&json!({}), &fields(&["domain"]), &OrderBy::default())
            .unwrap();
        assert!(body.filter_groups.is_empty());

        let body =
            build_search_request(&json!({"where": null}), &[], &OrderBy::default()).unwrap();
        assert!(body.filter_groups.is_empty());
    }

    #[test]
    fn test_invalid_leaf_operator_propagates() {
        let query = json!({"where": {"left": "domain", "op": "0", "right": "example.com"}});
        let err = build_search_request(&query, &[], &OrderBy::default()).unwrap_err();
        assert!(matches!(err, ConnectorError::InvalidOperator(ref t) if t == "0"));
    }

    #[test]
    fn test_malformed_left_operand_under_and() {
        let query = json!({"where": {
            "left": "",
            "op": "AND",
            "right": {"left": "name", "op": "=", "right": "example"}
        }});
        let err = build_search_request(&query, &[], &OrderBy::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Aborted operation: Left key should contain an array"
        );
    }

    #[test]
    fn test_malformed_right_operand_under_or() {
        let query = json!({"where": {
            "left": {"left": "name", "op": "=", "right": "example"},
            "op": "OR",
            "right": 42
        }});
        let err = build_search_request(&query, &[], &OrderBy::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Aborted operation: Right key should contain an array"
        );
    }

    #[test]
    fn test_missing_operand_under_or() {
        let query = json!({"where": {
            "left": {"left": "name", "op": "=", "right": "example"},
            "op": "OR"
        }});
        let err = build_search_request(&query, &[], &OrderBy::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Aborted operation: Right key should contain an array"
        );
    }

    #[test]
    fn test_leaf_with_non_string_field_rejected() {
        let query = json!({"where": {"left": 7, "op": "=", "right": "x"}});
        let err = build_search_request(&query, &[], &OrderBy::default()).unwrap_err();
        assert!(matches!(err, ConnectorError::AbortedOperation(_)));
    }

    #[test]
    fn test_where_must_be_an_object() {
        let query = json!({"where": "domain = example.com"});
        let err = build_search_request(&query, &[], &OrderBy::default()).unwrap_err();
        assert!(matches!(err, ConnectorError::AbortedOperation(_)));
    }

    #[test]
    fn test_compile_typed_tree() {
        let expr = FilterExpression::Or(
            Box::new(FilterExpression::Leaf(FilterClause {
                field: "domain".to_string(),
                op: FilterOperator::Equal,
                value: json!("example.com"),
            })),
            Box::new(FilterExpression::Leaf(FilterClause {
                field: "name".to_string(),
                op: FilterOperator::Like,
                value: json!("example"),
            })),
        );
        let body = SearchRequest::compile(&expr, &fields(&["domain"]), &OrderBy::default());

        assert_eq!(body.filter_groups.len(), 2);
        assert_eq!(body.filter_groups[1].filters[0].operator, "CONTAINS_TOKEN");
        assert_eq!(body.properties, vec!["domain"]);
    }

    #[test]
    fn test_select_fields_kept_verbatim() {
        // Duplicates and ordering are the caller's responsibility.
        let query = json!({"where": {"left": "domain", "op": "=", "right": "example.com"}});
        let body = build_search_request(
            &query,
            &fields(&["name", "domain", "name"]),
            &OrderBy::default(),
        )
        .unwrap();
        assert_eq!(body.properties, vec!["name", "domain", "name"]);
    }
}
