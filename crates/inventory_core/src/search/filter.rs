//! Item filter and SQL query construction.
//!
//! # Responsibility
//! - Convert an `ItemFilter` into an ordered predicate list.
//! - Render predicates into SQL text with positional placeholders only.
//!
//! # Invariants
//! - User input never appears in SQL text; it is only ever a bound value.
//! - Bind order equals placeholder order: text columns in declaration order,
//!   then `quantity`.
//! - Results are ordered `created_at DESC, id DESC`.
//! - An empty string is "no constraint"; whitespace-only text is a constraint.

use crate::db::{StoreError, StoreResult};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

pub(crate) const ITEM_SELECT_SQL: &str = "SELECT
    id,
    name,
    part_number,
    nsn,
    serial_number,
    quantity,
    created_at
FROM items";

const ORDER_BY_SQL: &str = " ORDER BY created_at DESC, id DESC";
const LIKE_ESCAPE: char = '\\';

/// Sparse search filter as entered in the form.
///
/// `None` and `Some("")` both mean "no constraint on this column".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFilter {
    pub name: Option<String>,
    pub part_number: Option<String>,
    pub nsn: Option<String>,
    pub serial_number: Option<String>,
    /// Whole-number text; matched exactly against `items.quantity`.
    pub quantity: Option<String>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn with_part_number(mut self, value: impl Into<String>) -> Self {
        self.part_number = Some(value.into());
        self
    }

    pub fn with_nsn(mut self, value: impl Into<String>) -> Self {
        self.nsn = Some(value.into());
        self
    }

    pub fn with_serial_number(mut self, value: impl Into<String>) -> Self {
        self.serial_number = Some(value.into());
        self
    }

    pub fn with_quantity(mut self, value: impl Into<String>) -> Self {
        self.quantity = Some(value.into());
        self
    }

    /// Returns `true` when no field constrains the search.
    pub fn is_unconstrained(&self) -> bool {
        [
            &self.name,
            &self.part_number,
            &self.nsn,
            &self.serial_number,
            &self.quantity,
        ]
        .into_iter()
        .all(|value| supplied(value).is_none())
    }
}

/// Text column that supports substring matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColumn {
    Name,
    PartNumber,
    Nsn,
    SerialNumber,
}

impl TextColumn {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PartNumber => "part_number",
            Self::Nsn => "nsn",
            Self::SerialNumber => "serial_number",
        }
    }
}

/// One `WHERE` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Column contains `needle` anywhere, compared literally.
    Contains { column: TextColumn, needle: String },
    /// `quantity` equals the value exactly.
    QuantityEquals(i64),
}

impl Predicate {
    fn sql(&self) -> String {
        match self {
            Self::Contains { column, .. } => {
                format!("{} LIKE ? ESCAPE '{LIKE_ESCAPE}'", column.as_sql())
            }
            Self::QuantityEquals(_) => "quantity = ?".to_string(),
        }
    }

    fn bind_value(&self) -> Value {
        match self {
            Self::Contains { needle, .. } => Value::Text(format!("%{}%", escape_like(needle))),
            Self::QuantityEquals(quantity) => Value::Integer(*quantity),
        }
    }
}

/// Rendered query text and its positional bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemQuery {
    sql: String,
    params: Vec<Value>,
}

impl ItemQuery {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bind values in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

/// Converts a filter into predicates in bind order.
///
/// # Errors
/// - `StoreError::InvalidFilter` when `quantity` is supplied but is not a
///   whole number.
pub fn build_predicates(filter: &ItemFilter) -> StoreResult<Vec<Predicate>> {
    let text_filters = [
        (TextColumn::Name, &filter.name),
        (TextColumn::PartNumber, &filter.part_number),
        (TextColumn::Nsn, &filter.nsn),
        (TextColumn::SerialNumber, &filter.serial_number),
    ];

    let mut predicates: Vec<Predicate> = text_filters
        .into_iter()
        .filter_map(|(column, value)| {
            supplied(value).map(|needle| Predicate::Contains {
                column,
                needle: needle.to_string(),
            })
        })
        .collect();

    if let Some(raw) = supplied(&filter.quantity) {
        let quantity = parse_quantity(raw).ok_or_else(|| StoreError::InvalidFilter {
            field: "quantity",
            value: raw.to_string(),
        })?;
        predicates.push(Predicate::QuantityEquals(quantity));
    }

    Ok(predicates)
}

/// Builds the full search statement for `filter`.
pub fn build_item_query(filter: &ItemFilter) -> StoreResult<ItemQuery> {
    let predicates = build_predicates(filter)?;

    let mut sql = String::from(ITEM_SELECT_SQL);
    if !predicates.is_empty() {
        let conditions = predicates
            .iter()
            .map(Predicate::sql)
            .collect::<Vec<_>>()
            .join(" AND ");
        sql.push_str(" WHERE ");
        sql.push_str(&conditions);
    }
    sql.push_str(ORDER_BY_SQL);

    let params = predicates.iter().map(Predicate::bind_value).collect();
    Ok(ItemQuery { sql, params })
}

/// Parses a whole number that must run to the end of the string.
///
/// Leading whitespace and an optional sign are accepted; trailing characters,
/// including whitespace, are not.
pub fn parse_quantity(raw: &str) -> Option<i64> {
    raw.trim_start().parse::<i64>().ok()
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == LIKE_ESCAPE || ch == '%' || ch == '_' {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{
        build_item_query, build_predicates, escape_like, parse_quantity, ItemFilter, Predicate,
        TextColumn,
    };
    use crate::db::StoreError;
    use rusqlite::types::Value;

    #[test]
    fn empty_filter_selects_everything_newest_first() {
        let query = build_item_query(&ItemFilter::new()).unwrap();
        assert!(!query.sql().contains("WHERE"));
        assert!(query.sql().ends_with("ORDER BY created_at DESC, id DESC"));
        assert!(query.params().is_empty());
    }

    #[test]
    fn empty_strings_are_treated_as_unset() {
        let filter = ItemFilter {
            name: Some(String::new()),
            part_number: Some(String::new()),
            nsn: Some(String::new()),
            serial_number: Some(String::new()),
            quantity: Some(String::new()),
        };
        assert!(filter.is_unconstrained());
        assert_eq!(
            build_item_query(&filter).unwrap(),
            build_item_query(&ItemFilter::new()).unwrap()
        );
    }

    #[test]
    fn all_fields_render_in_declaration_order_with_quantity_last() {
        let filter = ItemFilter::new()
            .with_quantity("5")
            .with_serial_number("SN")
            .with_nsn("NSN")
            .with_part_number("PN")
            .with_name("Widget");
        let query = build_item_query(&filter).unwrap();

        assert!(query.sql().contains(
            "WHERE name LIKE ? ESCAPE '\\' AND part_number LIKE ? ESCAPE '\\' \
             AND nsn LIKE ? ESCAPE '\\' AND serial_number LIKE ? ESCAPE '\\' \
             AND quantity = ? ORDER BY"
        ));
        assert_eq!(
            query.params(),
            &[
                Value::Text("%Widget%".to_string()),
                Value::Text("%PN%".to_string()),
                Value::Text("%NSN%".to_string()),
                Value::Text("%SN%".to_string()),
                Value::Integer(5),
            ]
        );
    }

    #[test]
    fn placeholder_count_matches_bind_count() {
        let filter = ItemFilter::new().with_nsn("1005").with_quantity("0");
        let query = build_item_query(&filter).unwrap();
        assert_eq!(query.sql().matches('?').count(), query.params().len());
        assert_eq!(
            query.params(),
            &[Value::Text("%1005%".to_string()), Value::Integer(0)]
        );
    }

    #[test]
    fn user_text_never_reaches_sql() {
        let filter = ItemFilter::new().with_name("x' OR '1'='1");
        let query = build_item_query(&filter).unwrap();
        assert!(!query.sql().contains("OR '1'"));
        assert_eq!(
            query.params(),
            &[Value::Text("%x' OR '1'='1%".to_string())]
        );
    }

    #[test]
    fn whitespace_only_text_is_a_constraint() {
        let predicates = build_predicates(&ItemFilter::new().with_serial_number(" ")).unwrap();
        assert_eq!(
            predicates,
            vec![Predicate::Contains {
                column: TextColumn::SerialNumber,
                needle: " ".to_string(),
            }]
        );
    }

    #[test]
    fn invalid_quantity_is_rejected() {
        for raw in ["abc", "5 ", " 5 ", " ", "5.0", "1e3", "99999999999999999999"] {
            let err = build_item_query(&ItemFilter::new().with_quantity(raw)).unwrap_err();
            assert!(
                matches!(&err, StoreError::InvalidFilter { field: "quantity", value } if value == raw),
                "unexpected result for {raw:?}: {err}"
            );
        }
    }

    #[test]
    fn parse_quantity_accepts_signed_whole_numbers() {
        assert_eq!(parse_quantity("0"), Some(0));
        assert_eq!(parse_quantity("+12"), Some(12));
        assert_eq!(parse_quantity("-3"), Some(-3));
        assert_eq!(parse_quantity(""), None);
    }

    #[test]
    fn parse_quantity_skips_leading_whitespace_only() {
        assert_eq!(parse_quantity(" 5"), Some(5));
        assert_eq!(parse_quantity("\t 7"), Some(7));
        assert_eq!(parse_quantity("5 "), None);
        assert_eq!(parse_quantity("5\n"), None);
    }

    #[test]
    fn leading_whitespace_quantity_binds_as_integer() {
        let query = build_item_query(&ItemFilter::new().with_quantity(" 5")).unwrap();
        assert_eq!(query.params(), &[Value::Integer(5)]);
    }

    #[test]
    fn escape_like_escapes_wildcards_and_escape_char() {
        assert_eq!(escape_like("100%_a\\b"), "100\\%\\_a\\\\b");
        assert_eq!(escape_like("O'Brien"), "O'Brien");
    }
}
