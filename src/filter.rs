//! The fluent filter builder.
//!
//! One `Filter` per request-in-progress. Every method takes and returns the
//! builder, so a chain keeps going even after a bad operator token; the
//! first failure is parked in the error slot and surfaced by [`Filter::finish`].

use crate::error::{PrestError, PrestResult};
use crate::ops::{Operator, SortOrder, TextSearchType};
use crate::params::Params;
use crate::value::FilterValue;
use serde::Serialize;

/// Builds the query parameters for one PostgREST request.
///
/// # Example
///
/// ```
/// use prest::prelude::*;
///
/// let params = Filter::new()
///     .eq("status", "active")
///     .gt("age", 21)
///     .order("created_at", SortOrder::Desc)
///     .finish()
///     .unwrap();
/// assert_eq!(params.get("age"), Some("gt.21"));
/// ```
#[derive(Debug, Default)]
pub struct Filter {
    params: Params,
    error: Option<PrestError>,
}

/// Values carrying `,`, `(` or `)` must be double-quoted inside `in.(...)`.
fn quote_reserved(value: &str) -> String {
    if value.contains([',', '(', ')']) {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

fn join_values<I, V>(values: I) -> String
where
    I: IntoIterator<Item = V>,
    V: Into<FilterValue>,
{
    let rendered: Vec<String> = values.into_iter().map(|v| v.into().to_string()).collect();
    rendered.join(",")
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park an error in the slot. The first failure wins; the slot is never
    /// cleared, so a poisoned chain stays poisoned until `finish`.
    fn record_error(&mut self, err: PrestError) {
        if self.error.is_none() {
            tracing::debug!("Encode error recorded: {}", err);
            self.error = Some(err);
        }
    }

    /// Write `column=<op>.<value>`.
    pub fn filter(
        mut self,
        column: impl AsRef<str>,
        op: Operator,
        value: impl Into<FilterValue>,
    ) -> Self {
        self.params
            .insert(column.as_ref(), format!("{}.{}", op.code(), value.into()));
        self
    }

    /// Write `column=not.<op>.<value>`, negating the operator.
    pub fn not(
        mut self,
        column: impl AsRef<str>,
        op: Operator,
        value: impl Into<FilterValue>,
    ) -> Self {
        self.params.insert(
            column.as_ref(),
            format!("not.{}.{}", op.code(), value.into()),
        );
        self
    }

    /// Like [`Filter::filter`], but the operator arrives as a wire token.
    ///
    /// An unknown token records [`PrestError::InvalidOperator`] and leaves
    /// the parameter set unchanged.
    pub fn filter_raw(
        mut self,
        column: impl AsRef<str>,
        op: &str,
        value: impl Into<FilterValue>,
    ) -> Self {
        match op.parse::<Operator>() {
            Ok(op) => self.filter(column, op, value),
            Err(err) => {
                self.record_error(err);
                self
            }
        }
    }

    /// Like [`Filter::not`], but the operator arrives as a wire token.
    ///
    /// An unknown token is silently ignored: no parameter is written and no
    /// error is recorded. Asymmetric with [`Filter::filter_raw`], which
    /// records the failure.
    pub fn not_raw(
        self,
        column: impl AsRef<str>,
        op: &str,
        value: impl Into<FilterValue>,
    ) -> Self {
        match op.parse::<Operator>() {
            Ok(op) => self.not(column, op, value),
            Err(_) => self,
        }
    }

    /// Write a pre-formatted disjunction: `or=(a.eq.1,b.eq.2)`.
    ///
    /// `filters` is not parsed or validated. A non-empty `foreign_table`
    /// scopes the key to `<foreign_table>.or`.
    pub fn or_filter(mut self, filters: impl AsRef<str>, foreign_table: impl AsRef<str>) -> Self {
        let table = foreign_table.as_ref();
        let key = if table.is_empty() {
            "or".to_string()
        } else {
            format!("{}.or", table)
        };
        self.params.insert(key, format!("({})", filters.as_ref()));
        self
    }

    /// Bulk equality: every `(key, value)` pair becomes `key=eq.<value>`.
    pub fn match_all<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FilterValue>,
    {
        for (key, value) in pairs {
            self.params
                .insert(key.as_ref(), format!("eq.{}", value.into()));
        }
        self
    }

    pub fn eq(self, column: impl AsRef<str>, value: impl Into<FilterValue>) -> Self {
        self.filter(column, Operator::Eq, value)
    }

    pub fn neq(self, column: impl AsRef<str>, value: impl Into<FilterValue>) -> Self {
        self.filter(column, Operator::Neq, value)
    }

    pub fn gt(self, column: impl AsRef<str>, value: impl Into<FilterValue>) -> Self {
        self.filter(column, Operator::Gt, value)
    }

    pub fn gte(self, column: impl AsRef<str>, value: impl Into<FilterValue>) -> Self {
        self.filter(column, Operator::Gte, value)
    }

    /// Filter: column < value
    pub fn lt(self, column: impl AsRef<str>, value: impl Into<FilterValue>) -> Self {
        self.filter(column, Operator::Lt, value)
    }

    pub fn lte(self, column: impl AsRef<str>, value: impl Into<FilterValue>) -> Self {
        self.filter(column, Operator::Lte, value)
    }

    pub fn like(self, column: impl AsRef<str>, pattern: impl Into<FilterValue>) -> Self {
        self.filter(column, Operator::Like, pattern)
    }

    pub fn ilike(self, column: impl AsRef<str>, pattern: impl Into<FilterValue>) -> Self {
        self.filter(column, Operator::Ilike, pattern)
    }

    /// `is` comparison for `null` and booleans: `is.null`, `is.true`.
    pub fn is(self, column: impl AsRef<str>, value: impl Into<FilterValue>) -> Self {
        self.filter(column, Operator::Is, value)
    }

    /// Set membership: `column=in.(a,b,c)`.
    ///
    /// Values containing `,`, `(` or `)` are double-quoted so they survive
    /// PostgREST's list syntax.
    pub fn in_vals<I, V>(mut self, column: impl AsRef<str>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        let quoted: Vec<String> = values
            .into_iter()
            .map(|v| quote_reserved(&v.into().to_string()))
            .collect();
        self.params
            .insert(column.as_ref(), format!("in.({})", quoted.join(",")));
        self
    }

    /// Array containment: `column=cs.a,b,c`.
    pub fn contains<I, V>(mut self, column: impl AsRef<str>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        self.params.insert(
            column.as_ref(),
            format!("{}.{}", Operator::Contains.code(), join_values(values)),
        );
        self
    }

    /// Array containment-by: `column=cd.a,b,c`.
    pub fn contained_by<I, V>(mut self, column: impl AsRef<str>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        self.params.insert(
            column.as_ref(),
            format!("{}.{}", Operator::ContainedBy.code(), join_values(values)),
        );
        self
    }

    /// Array overlap: `column=ov.a,b,c`.
    pub fn overlaps<I, V>(mut self, column: impl AsRef<str>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        self.params.insert(
            column.as_ref(),
            format!("{}.{}", Operator::Overlaps.code(), join_values(values)),
        );
        self
    }

    /// JSON containment: serialize `value` and write `column=cs.<json>`.
    ///
    /// A serialization failure records the error; the parameter is still
    /// written, with an empty value segment.
    pub fn contains_object<T: Serialize>(self, column: impl AsRef<str>, value: &T) -> Self {
        self.object_op(column, Operator::Contains, value)
    }

    /// JSON containment-by: serialize `value` and write `column=cd.<json>`.
    pub fn contained_by_object<T: Serialize>(self, column: impl AsRef<str>, value: &T) -> Self {
        self.object_op(column, Operator::ContainedBy, value)
    }

    fn object_op<T: Serialize>(
        mut self,
        column: impl AsRef<str>,
        op: Operator,
        value: &T,
    ) -> Self {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(err) => {
                self.record_error(err.into());
                String::new()
            }
        };
        self.params
            .insert(column.as_ref(), format!("{}.{}", op.code(), json));
        self
    }

    /// Range strictly left of: `column=sl.(1,10)`.
    pub fn range_lt(self, column: impl AsRef<str>, range: impl Into<FilterValue>) -> Self {
        self.filter(column, Operator::StrictlyLeft, range)
    }

    /// Range strictly right of: `column=sr.(1,10)`.
    pub fn range_gt(self, column: impl AsRef<str>, range: impl Into<FilterValue>) -> Self {
        self.filter(column, Operator::StrictlyRight, range)
    }

    /// Range does not extend to the left of: `column=nxl.(1,10)`.
    pub fn range_gte(self, column: impl AsRef<str>, range: impl Into<FilterValue>) -> Self {
        self.filter(column, Operator::NoExtendLeft, range)
    }

    /// Range does not extend to the right of: `column=nxr.(1,10)`.
    pub fn range_lte(self, column: impl AsRef<str>, range: impl Into<FilterValue>) -> Self {
        self.filter(column, Operator::NoExtendRight, range)
    }

    /// Range adjacency: `column=adj.(1,10)`.
    pub fn range_adjacent(self, column: impl AsRef<str>, range: impl Into<FilterValue>) -> Self {
        self.filter(column, Operator::Adjacent, range)
    }

    /// Full-text search: `column=<type>fts(<config>).<query>`.
    ///
    /// The parenthesized config segment is omitted when `config` is empty,
    /// and [`TextSearchType::Basic`] contributes no prefix.
    pub fn text_search(
        mut self,
        column: impl AsRef<str>,
        query: impl AsRef<str>,
        config: impl AsRef<str>,
        ts_type: TextSearchType,
    ) -> Self {
        let config = config.as_ref();
        let config_part = if config.is_empty() {
            String::new()
        } else {
            format!("({})", config)
        };
        self.params.insert(
            column.as_ref(),
            format!("{}fts{}.{}", ts_type.code(), config_part, query.as_ref()),
        );
        self
    }

    /// Like [`Filter::text_search`], but the type arrives as a token
    /// (`plain`, `phrase`, `websearch` or empty).
    ///
    /// An unknown token records [`PrestError::InvalidTextSearchType`] and
    /// leaves the parameter unwritten.
    pub fn text_search_raw(
        mut self,
        column: impl AsRef<str>,
        query: impl AsRef<str>,
        config: impl AsRef<str>,
        ts_type: &str,
    ) -> Self {
        match ts_type.parse::<TextSearchType>() {
            Ok(ts_type) => self.text_search(column, query, config, ts_type),
            Err(err) => {
                self.record_error(err);
                self
            }
        }
    }

    /// Vertical filtering: `select=a,b,c`.
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cols: Vec<String> = columns
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect();
        self.params.insert("select", cols.join(","));
        self
    }

    /// Ordering: appends `column.<dir>` to the `order` parameter, so
    /// repeated calls build a comma-separated list.
    pub fn order(mut self, column: impl AsRef<str>, order: SortOrder) -> Self {
        let term = format!("{}.{}", column.as_ref(), order.code());
        let value = match self.params.get("order") {
            Some(existing) => format!("{},{}", existing, term),
            None => term,
        };
        self.params.insert("order", value);
        self
    }

    pub fn limit(mut self, count: u64) -> Self {
        self.params.insert("limit", count.to_string());
        self
    }

    pub fn offset(mut self, count: u64) -> Self {
        self.params.insert("offset", count.to_string());
        self
    }

    /// Borrow the parameters written so far.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Borrow the parked error, if any operation has failed.
    pub fn error(&self) -> Option<&PrestError> {
        self.error.as_ref()
    }

    /// Check the error slot once and hand the parameter set to the caller.
    pub fn finish(self) -> PrestResult<Params> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_OPERATORS: [Operator; 22] = [
        Operator::Eq,
        Operator::Neq,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::Like,
        Operator::Ilike,
        Operator::Is,
        Operator::In,
        Operator::Contains,
        Operator::ContainedBy,
        Operator::StrictlyLeft,
        Operator::StrictlyRight,
        Operator::NoExtendLeft,
        Operator::NoExtendRight,
        Operator::Adjacent,
        Operator::Overlaps,
        Operator::Fts,
        Operator::Plfts,
        Operator::Phfts,
        Operator::Wfts,
    ];

    #[test]
    fn test_filter_encodes_every_operator() {
        for op in ALL_OPERATORS {
            let filter = Filter::new().filter("col", op, "v");
            assert_eq!(
                filter.params().get("col"),
                Some(format!("{}.v", op.code()).as_str()),
            );
        }
    }

    #[test]
    fn test_filter_raw_rejects_unknown_operator() {
        let filter = Filter::new().filter_raw("age", "bogus", "5");
        assert!(filter.params().is_empty());
        assert!(matches!(
            filter.error(),
            Some(PrestError::InvalidOperator(token)) if token == "bogus"
        ));
    }

    #[test]
    fn test_not_encodes_negation_prefix() {
        let filter = Filter::new().not("age", Operator::Eq, 5);
        assert_eq!(filter.params().get("age"), Some("not.eq.5"));
    }

    #[test]
    fn test_not_raw_ignores_unknown_operator() {
        let filter = Filter::new().not_raw("age", "bogus", "5");
        assert!(filter.params().is_empty());
        assert!(filter.error().is_none());
    }

    #[test]
    fn test_in_vals_quotes_reserved_characters() {
        let filter = Filter::new().in_vals("tags", ["a,b", "c"]);
        assert_eq!(filter.params().get("tags"), Some("in.(\"a,b\",c)"));

        let filter = Filter::new().in_vals("names", ["it(a)", "plain"]);
        assert_eq!(filter.params().get("names"), Some("in.(\"it(a)\",plain)"));
    }

    #[test]
    fn test_containment_operators() {
        let filter = Filter::new().contains("tags", ["a", "b"]);
        assert_eq!(filter.params().get("tags"), Some("cs.a,b"));

        let filter = Filter::new().contained_by("tags", ["a", "b"]);
        assert_eq!(filter.params().get("tags"), Some("cd.a,b"));

        let filter = Filter::new().overlaps("period", ["2024-01-01", "2024-06-30"]);
        assert_eq!(
            filter.params().get("period"),
            Some("ov.2024-01-01,2024-06-30")
        );
    }

    #[test]
    fn test_object_containment_serializes_compact_json() {
        use std::collections::BTreeMap;

        let mut doc = BTreeMap::new();
        doc.insert("role", "admin");

        let filter = Filter::new().contains_object("meta", &doc);
        assert_eq!(filter.params().get("meta"), Some("cs.{\"role\":\"admin\"}"));

        let filter = Filter::new().contained_by_object("meta", &doc);
        assert_eq!(filter.params().get("meta"), Some("cd.{\"role\":\"admin\"}"));
    }

    #[test]
    fn test_text_search_variants() {
        let filter = Filter::new().text_search("body", "cat", "english", TextSearchType::Phrase);
        assert_eq!(filter.params().get("body"), Some("phfts(english).cat"));

        let filter = Filter::new().text_search("body", "cat", "", TextSearchType::Phrase);
        assert_eq!(filter.params().get("body"), Some("phfts.cat"));

        let filter = Filter::new().text_search("body", "cat", "", TextSearchType::Basic);
        assert_eq!(filter.params().get("body"), Some("fts.cat"));

        let filter = Filter::new().text_search("body", "cat", "english", TextSearchType::Plain);
        assert_eq!(filter.params().get("body"), Some("plfts(english).cat"));

        let filter = Filter::new().text_search("body", "cat", "", TextSearchType::Websearch);
        assert_eq!(filter.params().get("body"), Some("wfts.cat"));
    }

    #[test]
    fn test_text_search_raw_rejects_unknown_type() {
        let filter = Filter::new().text_search_raw("body", "cat", "english", "fuzzy");
        assert!(filter.params().is_empty());
        assert!(matches!(
            filter.error(),
            Some(PrestError::InvalidTextSearchType(token)) if token == "fuzzy"
        ));
    }

    #[test]
    fn test_or_filter_key_forms() {
        let filter = Filter::new().or_filter("a.eq.1,b.eq.2", "");
        assert_eq!(filter.params().get("or"), Some("(a.eq.1,b.eq.2)"));

        let filter = Filter::new().or_filter("a.eq.1", "posts");
        assert_eq!(filter.params().get("posts.or"), Some("(a.eq.1)"));
    }

    #[test]
    fn test_match_all_bulk_equality() {
        let filter = Filter::new().match_all([("status", "active"), ("role", "admin")]);
        assert_eq!(filter.params().get("status"), Some("eq.active"));
        assert_eq!(filter.params().get("role"), Some("eq.admin"));
    }

    #[test]
    fn test_range_operators() {
        let filter = Filter::new()
            .range_lt("during", "(1,10)")
            .range_adjacent("slot", "(2,5)");
        assert_eq!(filter.params().get("during"), Some("sl.(1,10)"));
        assert_eq!(filter.params().get("slot"), Some("adj.(2,5)"));
    }

    #[test]
    fn test_first_error_wins() {
        let filter = Filter::new()
            .filter_raw("a", "bogus", "1")
            .text_search_raw("b", "cat", "", "fuzzy");
        assert!(matches!(
            filter.error(),
            Some(PrestError::InvalidOperator(token)) if token == "bogus"
        ));
    }

    #[test]
    fn test_chain_continues_after_error() {
        let filter = Filter::new().filter_raw("a", "bogus", "1").eq("b", 2);
        assert_eq!(filter.params().get("b"), Some("eq.2"));
        assert!(filter.finish().is_err());
    }

    #[test]
    fn test_shaping_parameters() {
        let filter = Filter::new()
            .select(["id", "name"])
            .order("created_at", SortOrder::Desc)
            .order("id", SortOrder::AscNullsLast)
            .limit(10)
            .offset(20);
        assert_eq!(filter.params().get("select"), Some("id,name"));
        assert_eq!(
            filter.params().get("order"),
            Some("created_at.desc,id.asc.nullslast")
        );
        assert_eq!(filter.params().get("limit"), Some("10"));
        assert_eq!(filter.params().get("offset"), Some("20"));
    }

    #[test]
    fn test_typed_values() {
        let filter = Filter::new().eq("active", true).lt("score", 1.5);
        assert_eq!(filter.params().get("active"), Some("eq.true"));
        assert_eq!(filter.params().get("score"), Some("lt.1.5"));
    }

    #[test]
    fn test_is_null() {
        let filter = Filter::new().is("deleted_at", FilterValue::Null);
        assert_eq!(filter.params().get("deleted_at"), Some("is.null"));
    }
}
