//! Dynamic query construction for list endpoints
//!
//! The builder half collects WHERE predicates in insertion order; the
//! renderer assigns every positional placeholder in one pass, so `$N`
//! always names the N-th bound parameter no matter which filters are
//! active. The executor half binds the finished parameter list in that
//! same order.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use crate::error::Result;

/// Default number of rows returned by list queries
pub const DEFAULT_LIMIT: i64 = 10;

/// Row cap for list queries, clamped to at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit(i64);

impl Limit {
    /// Create a limit, clamping non-positive values up to 1
    pub fn new(rows: i64) -> Self {
        Self(rows.max(1))
    }

    /// The row count as bound to `LIMIT`
    pub fn get(self) -> i64 {
        self.0
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}

/// A value bound to a positional placeholder.
///
/// Numeric filters bind as native integers so PostgreSQL compares them
/// numerically rather than lexically.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Int(i64),
    Text(String),
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for BindValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i16> for BindValue {
    fn from(v: i16) -> Self {
        Self::Int(v.into())
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

/// Comparison operator for a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `=`
    Eq,
    /// `LIKE`
    Like,
    /// `>` (strict)
    Gt,
    /// `<` (strict)
    Lt,
    /// `>=`
    Gte,
}

impl Comparison {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Like => "LIKE",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Gte => ">=",
        }
    }
}

/// One WHERE condition awaiting a placeholder index
#[derive(Debug, Clone)]
struct Predicate {
    column: &'static str,
    cmp: Comparison,
    value: BindValue,
}

/// Ordered collection of WHERE predicates.
///
/// Placeholder indices are not chosen here. [`PredicateList::into_plan`]
/// assigns them all in a single pass, which keeps the SQL text and the
/// parameter list from drifting apart.
///
/// # Example
///
/// ```
/// use staybnb_db::query::{Comparison, Limit, PredicateList};
///
/// let mut filters = PredicateList::new();
/// filters.push("city", Comparison::Like, "%van%");
/// let plan = filters.into_plan("SELECT id FROM properties", "GROUP BY id", Limit::new(20));
///
/// assert!(plan.sql.contains("city LIKE $1"));
/// assert!(plan.sql.ends_with("LIMIT $2"));
/// ```
#[derive(Debug, Default)]
pub struct PredicateList {
    predicates: Vec<Predicate>,
}

impl PredicateList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate. Insertion order is render order.
    pub fn push(&mut self, column: &'static str, cmp: Comparison, value: impl Into<BindValue>) {
        self.predicates.push(Predicate {
            column,
            cmp,
            value: value.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Render the finished statement: `base`, then a single AND-joined
    /// WHERE clause (omitted entirely when no predicates were pushed),
    /// then `tail` (GROUP BY / ORDER BY), then `LIMIT` bound as the final
    /// parameter.
    ///
    /// Each placeholder index equals the parameter list's length right
    /// after its value is pushed, so the text and the bindings cannot
    /// disagree.
    pub fn into_plan(self, base: &str, tail: &str, limit: Limit) -> QueryPlan {
        let mut sql = String::from(base);
        let mut params: Vec<BindValue> = Vec::with_capacity(self.predicates.len() + 1);

        for (i, predicate) in self.predicates.into_iter().enumerate() {
            sql.push_str(if i == 0 { "\nWHERE " } else { "\n  AND " });
            params.push(predicate.value);
            sql.push_str(&format!(
                "{} {} ${}",
                predicate.column,
                predicate.cmp.as_sql(),
                params.len()
            ));
        }

        if !tail.is_empty() {
            sql.push('\n');
            sql.push_str(tail);
        }

        params.push(BindValue::Int(limit.get()));
        sql.push_str(&format!("\nLIMIT ${}", params.len()));

        QueryPlan { sql, params }
    }
}

/// SQL text plus its ordered parameter list, ready to execute
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryPlan {
    /// Execute against the pool and decode every row.
    ///
    /// No matching rows is `Ok` with an empty `Vec`; an `Err` always
    /// means the query itself failed.
    pub async fn fetch_all<T>(&self, pool: &PgPool) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<_, T>(&self.sql);
        for value in &self.params {
            query = match value {
                BindValue::Int(v) => query.bind(*v),
                BindValue::Text(v) => query.bind(v.as_str()),
            };
        }
        Ok(query.fetch_all(pool).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_renders_no_where() {
        let plan = PredicateList::new().into_plan("SELECT 1", "", Limit::default());

        assert_eq!(plan.sql, "SELECT 1\nLIMIT $1");
        assert_eq!(plan.params, vec![BindValue::Int(10)]);
    }

    #[test]
    fn indices_follow_insertion_order() {
        let mut filters = PredicateList::new();
        filters.push("a", Comparison::Eq, 1i64);
        filters.push("b", Comparison::Gt, 2i64);
        filters.push("c", Comparison::Like, "x");
        assert_eq!(filters.len(), 3);

        let plan = filters.into_plan("SELECT 1", "", Limit::new(5));

        assert!(plan.sql.contains("a = $1"));
        assert!(plan.sql.contains("b > $2"));
        assert!(plan.sql.contains("c LIKE $3"));
        assert!(plan.sql.ends_with("LIMIT $4"));
        assert_eq!(
            plan.params,
            vec![
                BindValue::Int(1),
                BindValue::Int(2),
                BindValue::Text("x".to_owned()),
                BindValue::Int(5),
            ]
        );
    }

    #[test]
    fn predicates_share_one_where_clause() {
        let mut filters = PredicateList::new();
        filters.push("a", Comparison::Eq, 1i64);
        filters.push("b", Comparison::Lt, 2i64);

        let plan = filters.into_plan("SELECT 1", "", Limit::default());

        assert_eq!(plan.sql.matches("WHERE").count(), 1);
        assert_eq!(plan.sql.matches("AND").count(), 1);
    }

    #[test]
    fn tail_sits_between_where_and_limit() {
        let mut filters = PredicateList::new();
        filters.push("a", Comparison::Gte, 4i64);

        let plan = filters.into_plan("SELECT 1", "GROUP BY id\nORDER BY cost", Limit::new(3));

        assert_eq!(
            plan.sql,
            "SELECT 1\nWHERE a >= $1\nGROUP BY id\nORDER BY cost\nLIMIT $2"
        );
    }

    #[test]
    fn limit_clamps_to_one() {
        assert_eq!(Limit::new(0).get(), 1);
        assert_eq!(Limit::new(-5).get(), 1);
        assert_eq!(Limit::new(7).get(), 7);
        assert_eq!(Limit::default().get(), DEFAULT_LIMIT);
    }

    #[test]
    fn comparison_sql_tokens() {
        assert_eq!(Comparison::Eq.as_sql(), "=");
        assert_eq!(Comparison::Like.as_sql(), "LIKE");
        assert_eq!(Comparison::Gt.as_sql(), ">");
        assert_eq!(Comparison::Lt.as_sql(), "<");
        assert_eq!(Comparison::Gte.as_sql(), ">=");
    }
}
