use std::str::FromStr;

use async_trait::async_trait;
use sea_orm::sea_query::Query;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityName, EntityTrait,
    FromQueryResult, IdenStatic, QueryResult, QueryTrait, Statement,
};
use tracing::{debug, error, instrument};

use crate::criteria::{Criteria, Sortable, compose};
use crate::dao::{FieldMap, ProductDao};
use crate::entity::{self, Column, Entity};
use crate::error::{ProductError, ProductResult};

const TABLE: &str = "product";
const BACKEND: DbBackend = DbBackend::Postgres;

pub struct PgProductDao {
    db: DatabaseConnection,
}

impl PgProductDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_all(&self, stmt: Statement) -> ProductResult<Vec<QueryResult>> {
        debug!(table = TABLE, sql = %stmt.sql, args = %args_of(&stmt), "query");
        self.db
            .query_all_raw(stmt.clone())
            .await
            .map_err(|source| query_error(&stmt, source))
    }

    async fn fetch_one(&self, stmt: Statement) -> ProductResult<Option<QueryResult>> {
        debug!(table = TABLE, sql = %stmt.sql, args = %args_of(&stmt), "query");
        self.db
            .query_one_raw(stmt.clone())
            .await
            .map_err(|source| query_error(&stmt, source))
    }

    /// Execute a mutation that must touch exactly one row.
    async fn execute_one(
        &self,
        stmt: Statement,
        operation: &'static str,
        id: &str,
    ) -> ProductResult<()> {
        debug!(table = TABLE, sql = %stmt.sql, args = %args_of(&stmt), "execute");
        let result = self
            .db
            .execute_raw(stmt.clone())
            .await
            .map_err(|source| query_error(&stmt, source))?;

        if result.rows_affected() == 0 {
            error!(table = TABLE, sql = %stmt.sql, id, "0 rows were affected");
            return Err(ProductError::NoRowsAffected {
                operation,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ProductDao for PgProductDao {
    #[instrument(skip(self, criteria, sort), fields(criteria = criteria.len()))]
    async fn all<'a>(
        &self,
        criteria: &'a [Box<dyn Criteria>],
        sort: &'a (dyn Sortable + 'a),
    ) -> ProductResult<Vec<entity::Model>> {
        let stmt = select_all(criteria, sort);
        let rows = self.fetch_all(stmt.clone()).await?;
        rows.iter().map(|row| decode(&stmt, row)).collect()
    }

    #[instrument(skip(self))]
    async fn one(&self, id: &str) -> ProductResult<entity::Model> {
        let stmt = select_one(id);
        match self.fetch_one(stmt.clone()).await? {
            Some(row) => decode(&stmt, &row),
            None => Err(ProductError::NotFound(id.to_string())),
        }
    }

    #[instrument(skip_all)]
    async fn create(&self, fields: FieldMap) -> ProductResult<()> {
        let stmt = insert(&fields)?;
        self.execute_one(stmt, "created", &field_id(&fields)).await
    }

    #[instrument(skip(self, fields))]
    async fn update(&self, id: &str, fields: FieldMap) -> ProductResult<()> {
        let stmt = update(id, &fields)?;
        self.execute_one(stmt, "updated", id).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ProductResult<()> {
        self.execute_one(delete(id), "deleted", id).await
    }
}

/// `SELECT` of every product column, narrowed and ordered.
pub fn select_all(criteria: &[Box<dyn Criteria>], sort: &dyn Sortable) -> Statement {
    compose(Entity::find(), criteria, sort).build(BACKEND)
}

pub fn select_one(id: &str) -> Statement {
    Entity::find_by_id(id.to_string()).build(BACKEND)
}

pub fn insert(fields: &FieldMap) -> ProductResult<Statement> {
    if fields.is_empty() {
        return Err(ProductError::QueryBuild("insert without columns".into()));
    }

    let mut columns = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        columns.push(column(name)?);
        values.push(value.clone().into());
    }

    let mut stmt = Query::insert();
    stmt.into_table(Entity.table_ref())
        .columns(columns)
        .values(values)
        .map_err(|e| ProductError::QueryBuild(e.to_string()))?;
    Ok(BACKEND.build(&stmt))
}

pub fn update(id: &str, fields: &FieldMap) -> ProductResult<Statement> {
    if fields.is_empty() {
        return Err(ProductError::QueryBuild("update without columns".into()));
    }

    let mut stmt = Query::update();
    stmt.table(Entity.table_ref());
    for (name, value) in fields {
        stmt.value(column(name)?, value.clone());
    }
    stmt.and_where(Column::Id.eq(id));
    Ok(BACKEND.build(&stmt))
}

pub fn delete(id: &str) -> Statement {
    let mut stmt = Query::delete();
    stmt.from_table(Entity.table_ref()).and_where(Column::Id.eq(id));
    BACKEND.build(&stmt)
}

fn column(name: &str) -> ProductResult<Column> {
    Column::from_str(name)
        .map_err(|_| ProductError::QueryBuild(format!("unknown column '{name}' in field map")))
}

fn decode(stmt: &Statement, row: &QueryResult) -> ProductResult<entity::Model> {
    entity::Model::from_query_result(row, "").map_err(|e| {
        error!(table = TABLE, sql = %stmt.sql, error = %e, "failed to decode row");
        ProductError::Decode {
            origin: format!("row of `{}`", stmt.sql),
            reason: e.to_string(),
        }
    })
}

fn query_error(stmt: &Statement, source: DbErr) -> ProductError {
    let args = args_of(stmt);
    error!(table = TABLE, sql = %stmt.sql, %args, error = %source, "query failed");
    ProductError::Query {
        sql: stmt.sql.clone(),
        args,
        source,
    }
}

fn args_of(stmt: &Statement) -> String {
    stmt.values
        .as_ref()
        .map(|values| format!("{:?}", values.0))
        .unwrap_or_else(|| "[]".to_string())
}

fn field_id(fields: &FieldMap) -> String {
    match fields.get(Column::Id.as_str()) {
        Some(sea_orm::Value::String(Some(id))) => id.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{CategoryCriteria, Sort};
    use chrono::{TimeZone, Utc};
    use sea_orm::{MockDatabase, MockExecResult, Value};
    use serde_json::json;

    fn model(id: &str, category_id: i32, price: i64) -> entity::Model {
        entity::Model {
            id: id.to_string(),
            name: format!("product {id}"),
            description: String::new(),
            image_id: None,
            price,
            currency_id: 840,
            rating: 5,
            category_id,
            specification: json!({"color": "red"}),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    fn fields(id: &str) -> FieldMap {
        FieldMap::from([
            ("id".to_string(), Value::from(id)),
            ("name".to_string(), Value::from("Kettle")),
            ("price".to_string(), Value::from(2_500i64)),
        ])
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[test]
    fn test_select_all_lists_columns_explicitly() {
        let stmt = select_all(&[], &Sort::unsorted());
        assert!(stmt.sql.starts_with(r#"SELECT "product"."id", "product"."name""#), "{}", stmt.sql);
        assert!(stmt.sql.contains(r#""product"."updated_at" FROM "product""#), "{}", stmt.sql);
        assert!(!stmt.sql.contains('*'));
    }

    #[test]
    fn test_select_all_binds_category_as_parameter() {
        let stmt = select_all(
            &[Box::new(CategoryCriteria::new(Some(4)))],
            &Sort::parse("rating", "desc").unwrap(),
        );
        assert!(stmt.sql.contains(r#"WHERE "product"."category_id" = $1"#), "{}", stmt.sql);
        assert!(stmt.sql.ends_with(r#"ORDER BY "product"."rating" DESC"#), "{}", stmt.sql);
        assert_eq!(args_of(&stmt), format!("{:?}", vec![Value::from(4i64)]));
    }

    #[test]
    fn test_insert_uses_every_field() {
        let stmt = insert(&fields("p-1")).unwrap();
        assert_eq!(
            stmt.sql,
            r#"INSERT INTO "product" ("id", "name", "price") VALUES ($1, $2, $3)"#
        );
    }

    #[test]
    fn test_insert_rejects_unknown_column() {
        let mut map = fields("p-1");
        map.insert("colour".to_string(), Value::from("red"));
        let err = insert(&map).unwrap_err();
        assert!(matches!(err, ProductError::QueryBuild(msg) if msg.contains("colour")));
    }

    #[test]
    fn test_insert_and_update_reject_empty_map() {
        assert!(matches!(insert(&FieldMap::new()), Err(ProductError::QueryBuild(_))));
        assert!(matches!(update("p-1", &FieldMap::new()), Err(ProductError::QueryBuild(_))));
    }

    #[test]
    fn test_update_targets_id() {
        let stmt = update("p-1", &fields("p-1")).unwrap();
        assert_eq!(
            stmt.sql,
            r#"UPDATE "product" SET "id" = $1, "name" = $2, "price" = $3 WHERE "product"."id" = $4"#
        );
    }

    #[test]
    fn test_delete_targets_id() {
        assert_eq!(
            delete("p-1").sql,
            r#"DELETE FROM "product" WHERE "product"."id" = $1"#
        );
    }

    #[tokio::test]
    async fn test_all_decodes_every_row() {
        let rows = vec![model("a", 1, 100), model("b", 1, 200)];
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([rows.clone()])
            .into_connection();
        let dao = PgProductDao::new(db);

        let found = dao
            .all(&[Box::new(CategoryCriteria::new(Some(1)))], &Sort::unsorted())
            .await
            .unwrap();
        assert_eq!(found, rows);
    }

    #[tokio::test]
    async fn test_all_without_rows_is_empty() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();

        let found = PgProductDao::new(db).all(&[], &Sort::unsorted()).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_all_reports_query_failure_with_statement() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_errors([DbErr::Custom("relation does not exist".into())])
            .into_connection();

        let err = PgProductDao::new(db)
            .all(&[Box::new(CategoryCriteria::new(Some(9)))], &Sort::unsorted())
            .await
            .unwrap_err();
        match err {
            ProductError::Query { sql, args, .. } => {
                assert!(sql.contains("category_id"));
                assert!(args.contains('9'));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_one_found() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([vec![model("a", 2, 10)]])
            .into_connection();

        let found = PgProductDao::new(db).one("a").await.unwrap();
        assert_eq!(found, model("a", 2, 10));
    }

    #[tokio::test]
    async fn test_one_missing_is_not_found() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();

        let err = PgProductDao::new(db).one("missing").await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_create_requires_an_affected_row() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([exec(1), exec(0)])
            .into_connection();
        let dao = PgProductDao::new(db);

        dao.create(fields("p-1")).await.unwrap();
        let err = dao.create(fields("p-2")).await.unwrap_err();
        assert!(matches!(
            err,
            ProductError::NoRowsAffected { operation: "created", id } if id == "p-2"
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_require_an_affected_row() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([exec(0), exec(0)])
            .into_connection();
        let dao = PgProductDao::new(db);

        assert!(matches!(
            dao.update("gone", fields("gone")).await,
            Err(ProductError::NoRowsAffected { operation: "updated", .. })
        ));
        assert!(matches!(
            dao.delete("gone").await,
            Err(ProductError::NoRowsAffected { operation: "deleted", .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_succeeds_on_single_row() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([exec(1)])
            .into_connection();

        assert!(PgProductDao::new(db).delete("p-1").await.is_ok());
    }
}
