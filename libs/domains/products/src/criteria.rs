//! Query composition: predicates ([`Criteria`]) and ordering ([`Sortable`])
//! applied to a product `SELECT` before it is built.
//!
//! Every criteria is a no-op when it holds no value, so a request that leaves
//! a filter empty reads the same rows as one that never mentions it. Several
//! criteria applied in sequence combine with `AND`.

use std::fmt;
use std::str::FromStr;

use sea_orm::{ColumnTrait, Order, QueryFilter, QueryOrder, Select};
use strum::{Display, EnumString};

use crate::entity::{Column, Entity};
use crate::error::{ProductError, ProductResult};

/// A predicate that may narrow a product query.
pub trait Criteria: Send + Sync + fmt::Debug {
    fn meet_criteria(&self, query: Select<Entity>) -> Select<Entity>;
}

/// An ordering that may be imposed on a product query.
pub trait Sortable: Send + Sync + fmt::Debug {
    fn sort(&self, query: Select<Entity>) -> Select<Entity>;
}

/// Apply every criteria in order, then the sort.
pub fn compose(
    query: Select<Entity>,
    criteria: &[Box<dyn Criteria>],
    sort: &dyn Sortable,
) -> Select<Entity> {
    let filtered = criteria
        .iter()
        .fold(query, |query, criteria| criteria.meet_criteria(query));
    sort.sort(filtered)
}

/// `category_id = value`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCriteria {
    value: Option<u32>,
}

impl CategoryCriteria {
    pub fn new(value: Option<u32>) -> Self {
        Self { value }
    }
}

impl Criteria for CategoryCriteria {
    fn meet_criteria(&self, query: Select<Entity>) -> Select<Entity> {
        match self.value {
            Some(category_id) => query.filter(Column::CategoryId.eq(i64::from(category_id))),
            None => query,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// Single-column ordering.
///
/// The column is resolved against the `product` table when the sort is
/// parsed, so only known columns ever reach the statement.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sort {
    key: Option<(Column, SortOrder)>,
}

impl Sort {
    /// Leaves the storage-defined order untouched.
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(column: Column, order: SortOrder) -> Self {
        Self {
            key: Some((column, order)),
        }
    }

    /// Resolve a field name and a direction (`asc` / `desc`, any case).
    ///
    /// If either part is empty the result is [`Sort::unsorted`].
    pub fn parse(field: &str, order: &str) -> ProductResult<Self> {
        let (field, order) = (field.trim(), order.trim());
        if field.is_empty() || order.is_empty() {
            return Ok(Self::unsorted());
        }

        let column = Column::from_str(field)
            .map_err(|_| ProductError::Validation(format!("cannot sort by unknown field '{field}'")))?;
        let order = SortOrder::from_str(order).map_err(|_| {
            ProductError::Validation(format!("sort order must be 'asc' or 'desc', got '{order}'"))
        })?;

        Ok(Self::by(column, order))
    }

    pub fn is_unsorted(&self) -> bool {
        self.key.is_none()
    }
}

impl Sortable for Sort {
    fn sort(&self, query: Select<Entity>) -> Select<Entity> {
        match self.key {
            Some((column, order)) => query.order_by(column, order.into()),
            None => query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, EntityTrait, QueryTrait};

    fn sql(criteria: &[Box<dyn Criteria>], sort: &dyn Sortable) -> String {
        compose(Entity::find(), criteria, sort)
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_empty_category_is_no_op() {
        let baseline = sql(&[], &Sort::unsorted());
        let with_empty = sql(&[Box::new(CategoryCriteria::new(None))], &Sort::unsorted());

        assert_eq!(baseline, with_empty);
        assert!(!baseline.contains("WHERE"));
    }

    #[test]
    fn test_category_adds_equality_predicate() {
        let statement = sql(&[Box::new(CategoryCriteria::new(Some(7)))], &Sort::unsorted());
        assert!(
            statement.contains(r#"WHERE "product"."category_id" = 7"#),
            "{statement}"
        );
    }

    #[test]
    fn test_criteria_compose_with_and() {
        let statement = sql(
            &[
                Box::new(CategoryCriteria::new(Some(1))),
                Box::new(CategoryCriteria::new(Some(2))),
            ],
            &Sort::unsorted(),
        );
        assert!(
            statement.contains(r#""product"."category_id" = 1 AND "product"."category_id" = 2"#),
            "{statement}"
        );
    }

    #[test]
    fn test_sort_is_applied_after_filters() {
        let statement = sql(
            &[Box::new(CategoryCriteria::new(Some(3)))],
            &Sort::parse("price", "ASC").unwrap(),
        );
        assert!(
            statement.ends_with(r#"WHERE "product"."category_id" = 3 ORDER BY "product"."price" ASC"#),
            "{statement}"
        );
    }

    #[test]
    fn test_sort_descending() {
        let statement = sql(&[], &Sort::parse("created_at", "desc").unwrap());
        assert!(statement.ends_with(r#"ORDER BY "product"."created_at" DESC"#), "{statement}");
    }

    #[test]
    fn test_sort_with_missing_part_is_unsorted() {
        for (field, order) in [("", "asc"), ("price", ""), ("", ""), ("  ", "desc")] {
            let sort = Sort::parse(field, order).unwrap();
            assert!(sort.is_unsorted(), "{field:?} {order:?}");
            assert!(!sql(&[], &sort).contains("ORDER BY"));
        }
    }

    #[test]
    fn test_sort_rejects_unknown_field() {
        let err = Sort::parse("price; DROP TABLE product", "asc").unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[test]
    fn test_sort_rejects_unknown_order() {
        let err = Sort::parse("price", "sideways").unwrap_err();
        assert!(err.to_string().contains("'asc' or 'desc'"));
    }

    #[test]
    fn test_sort_order_display() {
        assert_eq!(SortOrder::Asc.to_string(), "asc");
        assert_eq!(SortOrder::Desc.to_string(), "desc");
    }
}
