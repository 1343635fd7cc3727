//! Builds parameterized SELECT, INSERT, UPDATE, and DELETE statements for the
//! products table, including the composed search query.

use crate::filter::ProductFilter;
use crate::product::ProductDraft;
use crate::sql::PgBindValue;

const TABLE: &str = "products";
const COLUMNS: &str = "id, name, category, price, stock";

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// SELECT of all rows in insertion order (ids are monotonic).
pub fn select_all() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {} ORDER BY id", COLUMNS, TABLE);
    q
}

/// SELECT one row by primary key.
pub fn select_by_id(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::I64(id));
    q.sql = format!("SELECT {} FROM {} WHERE id = ${}", COLUMNS, TABLE, n);
    q
}

/// INSERT one row; the id column is left to the database sequence.
pub fn insert(draft: &ProductDraft) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(PgBindValue::Text(draft.name.clone()));
    q.push_param(PgBindValue::Text(draft.category.clone()));
    q.push_param(PgBindValue::F64(draft.price));
    q.push_param(PgBindValue::I32(draft.stock));
    q.sql = format!(
        "INSERT INTO {} (name, category, price, stock) VALUES ($1, $2, $3, $4) RETURNING {}",
        TABLE, COLUMNS
    );
    q
}

/// UPDATE by id: full replace of every payload column.
pub fn update(id: i64, draft: &ProductDraft) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(PgBindValue::Text(draft.name.clone()));
    q.push_param(PgBindValue::Text(draft.category.clone()));
    q.push_param(PgBindValue::F64(draft.price));
    q.push_param(PgBindValue::I32(draft.stock));
    let n = q.push_param(PgBindValue::I64(id));
    q.sql = format!(
        "UPDATE {} SET name = $1, category = $2, price = $3, stock = $4 WHERE id = ${} RETURNING {}",
        TABLE, n, COLUMNS
    );
    q
}

/// DELETE by id.
pub fn delete(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::I64(id));
    q.sql = format!("DELETE FROM {} WHERE id = ${}", TABLE, n);
    q
}

/// SELECT composed from the filter: one clause per present criterion, joined
/// with AND; an empty filter reduces to `select_all`. Name matches as a
/// case-insensitive substring via ILIKE, category as exact equality, price
/// bounds inclusively. An inverted price range is emitted as-is and yields an
/// empty result set.
pub fn search(filter: &ProductFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();

    if let Some(name) = &filter.name {
        let n = q.push_param(PgBindValue::Text(format!("%{}%", name)));
        where_parts.push(format!("name ILIKE ${}", n));
    }
    if let Some(category) = &filter.category {
        let n = q.push_param(PgBindValue::Text(category.clone()));
        where_parts.push(format!("category = ${}", n));
    }
    if let Some(min) = filter.min_price {
        let n = q.push_param(PgBindValue::F64(min));
        where_parts.push(format!("price >= ${}", n));
    }
    if let Some(max) = filter.max_price {
        let n = q.push_param(PgBindValue::F64(max));
        where_parts.push(format!("price <= ${}", n));
    }

    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY id",
        COLUMNS, TABLE, where_clause
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            id: None,
            name: "Laptop".into(),
            category: "Electronics".into(),
            price: 999.99,
            stock: 10,
        }
    }

    #[test]
    fn select_all_orders_by_id() {
        let q = select_all();
        assert_eq!(
            q.sql,
            "SELECT id, name, category, price, stock FROM products ORDER BY id"
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn select_by_id_binds_the_key() {
        let q = select_by_id(7);
        assert_eq!(
            q.sql,
            "SELECT id, name, category, price, stock FROM products WHERE id = $1"
        );
        assert_eq!(q.params, vec![PgBindValue::I64(7)]);
    }

    #[test]
    fn insert_omits_id_and_returns_the_row() {
        let q = insert(&draft());
        assert_eq!(
            q.sql,
            "INSERT INTO products (name, category, price, stock) VALUES ($1, $2, $3, $4) \
             RETURNING id, name, category, price, stock"
        );
        assert_eq!(
            q.params,
            vec![
                PgBindValue::Text("Laptop".into()),
                PgBindValue::Text("Electronics".into()),
                PgBindValue::F64(999.99),
                PgBindValue::I32(10),
            ]
        );
    }

    #[test]
    fn update_replaces_every_column() {
        let q = update(3, &draft());
        assert_eq!(
            q.sql,
            "UPDATE products SET name = $1, category = $2, price = $3, stock = $4 \
             WHERE id = $5 RETURNING id, name, category, price, stock"
        );
        assert_eq!(q.params.len(), 5);
        assert_eq!(q.params[4], PgBindValue::I64(3));
    }

    #[test]
    fn search_with_empty_filter_is_select_all() {
        let q = search(&ProductFilter::default());
        assert_eq!(q.sql, select_all().sql);
        assert!(q.params.is_empty());
    }

    #[test]
    fn search_name_uses_ilike_with_wrapped_pattern() {
        let q = search(&ProductFilter {
            name: Some("top".into()),
            ..Default::default()
        });
        assert_eq!(
            q.sql,
            "SELECT id, name, category, price, stock FROM products \
             WHERE name ILIKE $1 ORDER BY id"
        );
        assert_eq!(q.params, vec![PgBindValue::Text("%top%".into())]);
    }

    #[test]
    fn search_joins_present_criteria_with_and() {
        let q = search(&ProductFilter {
            name: Some("o".into()),
            category: Some("Electronics".into()),
            min_price: Some(10.0),
            max_price: Some(50.0),
        });
        assert_eq!(
            q.sql,
            "SELECT id, name, category, price, stock FROM products \
             WHERE name ILIKE $1 AND category = $2 AND price >= $3 AND price <= $4 ORDER BY id"
        );
        assert_eq!(q.params.len(), 4);
    }

    #[test]
    fn search_price_range_alone_skips_other_clauses() {
        let q = search(&ProductFilter {
            min_price: Some(100.0),
            max_price: Some(50.0),
            ..Default::default()
        });
        assert_eq!(
            q.sql,
            "SELECT id, name, category, price, stock FROM products \
             WHERE price >= $1 AND price <= $2 ORDER BY id"
        );
        assert_eq!(
            q.params,
            vec![PgBindValue::F64(100.0), PgBindValue::F64(50.0)]
        );
    }
}
