//! Helpers shared by the integration suites
//!
//! - [`TestDatabase`]: disposable PostgreSQL with the product schema migrated
//! - [`TestScope`]: per-test names and category ids so tests can share a database
//! - [`assertions`]: checks with failure messages that say what was expected
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestScope};
//!
//! #[tokio::test]
//! async fn lists_one_category() {
//!     let db = TestDatabase::new().await;
//!     let scope = TestScope::named("lists_one_category");
//!
//!     let kitchen = scope.category(0);
//!     let kettle = scope.label("kettle");
//! }
//! ```

mod postgres;

use std::hash::{DefaultHasher, Hash, Hasher};

pub use postgres::TestDatabase;

/// Distinct slice of the id space for one test.
///
/// Derived from the test name only, so a rerun sees the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestScope {
    key: u64,
}

impl TestScope {
    pub fn named(test_name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        test_name.hash(&mut hasher);
        Self { key: hasher.finish() }
    }

    /// Category reserved for this scope; `slot` (mod 100) selects a neighbour.
    ///
    /// Stays below `i32::MAX` so it fits the `category_id` column.
    pub fn category(&self, slot: u32) -> u32 {
        (self.key % 1_000_000) as u32 * 100 + slot % 100
    }

    /// ```
    /// use test_utils::TestScope;
    ///
    /// let scope = TestScope::named("x");
    /// assert!(scope.label("kettle").ends_with("-kettle"));
    /// ```
    pub fn label(&self, what: &str) -> String {
        format!("it-{:x}-{what}", self.key)
    }
}

pub mod assertions {
    use std::fmt::Debug;

    #[track_caller]
    pub fn expect_some<T>(value: Option<T>, what: &str) -> T {
        match value {
            Some(value) => value,
            None => panic!("expected {what} to be set"),
        }
    }

    /// Fails on the first adjacent pair where `key` goes down.
    #[track_caller]
    pub fn assert_ascending_by<T, K>(items: &[T], key: impl Fn(&T) -> K, what: &str)
    where
        K: PartialOrd + Debug,
    {
        for (i, pair) in items.windows(2).enumerate() {
            let (left, right) = (key(&pair[0]), key(&pair[1]));
            assert!(
                left <= right,
                "{what} not ascending at position {i}: {left:?} then {right:?}"
            );
        }
    }
}
