//! Integration tests for the Products domain
//!
//! Run against a real PostgreSQL via testcontainers, with the schema created by
//! the `migration` crate. Ignored by default; run with `cargo test -- --ignored`
//! on a machine with Docker.

use domain_products::models::parse_specification;
use domain_products::*;
use sea_orm::ConnectionTrait;
use test_utils::{TestScope, TestDatabase, assertions::*};

fn policy(db: &TestDatabase) -> ProductPolicy<PgProductDao> {
    ProductPolicy::new(ProductService::new(PgProductDao::new(db.connection())))
}

fn product(scope: &TestScope, suffix: &str, category_id: u32, price: u64) -> Product {
    Product::new(CreateProduct {
        name: scope.label(suffix),
        description: format!("{suffix} description"),
        image_id: None,
        price,
        currency_id: 978,
        rating: 3,
        category_id,
        specification: parse_specification(r#"{"material": "oak", "dims": {"w": 40}}"#).unwrap(),
    })
}

fn by_category(category_id: Option<u32>) -> Vec<Box<dyn Criteria>> {
    vec![Box::new(CategoryCriteria::new(category_id))]
}

// ============================================================================
// Create / Read
// ============================================================================

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_then_one_returns_equal_entity() {
    let db = TestDatabase::new().await;
    let policy = policy(&db);
    let scope = TestScope::named("create_then_one");

    let created = policy
        .create(product(&scope, "main", scope.category(0), 1_999))
        .await
        .unwrap();
    let fetched = policy.one(&created.id).await.unwrap();

    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_with_image_and_empty_specification_round_trips() {
    let db = TestDatabase::new().await;
    let policy = policy(&db);
    let scope = TestScope::named("empty_specification");

    let mut input = product(&scope, "bare", scope.category(0), 0);
    input.specification = Specification::new();
    input.image_id = Some("img-1".into());

    let created = policy.create(input).await.unwrap();
    assert_eq!(policy.one(&created.id).await.unwrap(), created);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_one_missing_is_not_found() {
    let db = TestDatabase::new().await;
    let err = policy(&db).one("does-not-exist").await.unwrap_err();
    assert!(matches!(err.root(), ProductError::NotFound(_)));
}

// ============================================================================
// Filtering and sorting
// ============================================================================

#[tokio::test]
#[ignore] // Requires Docker
async fn test_empty_category_filter_equals_no_filter() {
    let db = TestDatabase::new().await;
    let policy = policy(&db);
    let scope = TestScope::named("empty_filter");

    for (i, category) in [0, 1, 2].into_iter().enumerate() {
        policy
            .create(product(&scope, &i.to_string(), scope.category(category), 100))
            .await
            .unwrap();
    }

    let sort = Sort::parse("id", "asc").unwrap();
    let unfiltered = policy.all(&[], &sort).await.unwrap();
    let empty_filter = policy.all(&by_category(None), &sort).await.unwrap();

    assert_eq!(unfiltered.len(), 3);
    assert_eq!(unfiltered, empty_filter);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_category_filter_with_price_ordering() {
    let db = TestDatabase::new().await;
    let policy = policy(&db);
    let scope = TestScope::named("category_price_order");
    let wanted = scope.category(0);
    let other = scope.category(1);

    for (suffix, category, price) in [
        ("c", wanted, 300),
        ("a", wanted, 100),
        ("x", other, 50),
        ("b", wanted, 200),
        ("d", wanted, 100),
    ] {
        policy
            .create(product(&scope, suffix, category, price))
            .await
            .unwrap();
    }

    let found = policy
        .all(&by_category(Some(wanted)), &Sort::parse("price", "asc").unwrap())
        .await
        .unwrap();

    assert_eq!(found.len(), 4);
    assert!(found.iter().all(|p| p.category_id == wanted));
    assert_ascending_by(&found, |p| p.price, "price asc");

    let descending = policy
        .all(&by_category(Some(wanted)), &Sort::parse("price", "DESC").unwrap())
        .await
        .unwrap();
    assert_eq!(descending.first().map(|p| p.price), Some(300));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_unknown_category_returns_empty_list() {
    let db = TestDatabase::new().await;
    let scope = TestScope::named("unknown_category");

    let found = policy(&db)
        .all(&by_category(Some(scope.category(42))), &Sort::unsorted())
        .await
        .unwrap();
    assert!(found.is_empty());
}

// ============================================================================
// Update / Delete
// ============================================================================

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_with_only_name_changes_only_name() {
    let db = TestDatabase::new().await;
    let policy = policy(&db);
    let scope = TestScope::named("partial_update");

    let created = policy
        .create(product(&scope, "before", scope.category(0), 700))
        .await
        .unwrap();

    let mut current = policy.one(&created.id).await.unwrap();
    current.apply_update(UpdateProduct {
        name: Some("renamed".into()),
        ..Default::default()
    });
    policy.update(&current).await.unwrap();

    let stored = policy.one(&created.id).await.unwrap();
    assert_eq!(stored.name, "renamed");
    let stamped = expect_some(stored.updated_at, "updated_at after update");
    assert!(stamped >= created.created_at);
    assert_eq!(
        Product {
            name: created.name.clone(),
            updated_at: None,
            ..stored
        },
        created
    );
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_missing_id_affects_no_rows() {
    let db = TestDatabase::new().await;
    let scope = TestScope::named("update_missing");
    let never_stored = product(&scope, "ghost", scope.category(0), 1);

    let err = policy(&db).update(&never_stored).await.unwrap_err();
    assert!(matches!(err.root(), ProductError::NoRowsAffected { .. }));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_delete_then_one_fails_and_second_delete_affects_no_rows() {
    let db = TestDatabase::new().await;
    let policy = policy(&db);
    let scope = TestScope::named("delete_twice");

    let created = policy
        .create(product(&scope, "doomed", scope.category(0), 10))
        .await
        .unwrap();

    policy.delete(&created.id).await.unwrap();
    assert!(matches!(
        policy.one(&created.id).await.unwrap_err().root(),
        ProductError::NotFound(_)
    ));
    assert!(matches!(
        policy.delete(&created.id).await.unwrap_err().root(),
        ProductError::NoRowsAffected { operation: "deleted", .. }
    ));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_duplicate_id_is_query_error() {
    let db = TestDatabase::new().await;
    let policy = policy(&db);
    let scope = TestScope::named("duplicate_id");

    let created = policy
        .create(product(&scope, "first", scope.category(0), 10))
        .await
        .unwrap();
    let err = policy.create(created).await.unwrap_err();
    assert!(matches!(err.root(), ProductError::Query { .. }));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_corrupt_row_is_decode_error() {
    let db = TestDatabase::new().await;
    db.connection
        .execute_unprepared(
            "INSERT INTO product (id, name, description, price, currency_id, rating, category_id, specification, created_at) \
             VALUES ('corrupt', 'n', 'd', -10, 1, 1, 1, '{}', now())",
        )
        .await
        .unwrap();

    let err = policy(&db).one("corrupt").await.unwrap_err();
    assert!(matches!(err.root(), ProductError::Decode { .. }));
}
