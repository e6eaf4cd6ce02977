use sea_orm::DbErr;
use thiserror::Error;
use tonic::{Code, Status};

#[derive(Debug, Error)]
pub enum ProductError {
    /// The statement could not be assembled; nothing reached the database.
    #[error("failed to build query: {0}")]
    QueryBuild(String),

    #[error("failed to execute `{sql}` with args {args}: {source}")]
    Query {
        sql: String,
        args: String,
        #[source]
        source: DbErr,
    },

    /// A row (or a stored value) does not fit the product record.
    #[error("failed to decode {origin}: {reason}")]
    Decode { origin: String, reason: String },

    #[error("product was not {operation}: 0 rows were affected for id {id}")]
    NoRowsAffected { operation: &'static str, id: String },

    #[error("product {0} not found")]
    NotFound(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{context}: {source}")]
    Context {
        context: &'static str,
        #[source]
        source: Box<ProductError>,
    },
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Innermost error, with every [`ProductError::Context`] layer peeled off.
    pub fn root(&self) -> &ProductError {
        match self {
            ProductError::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether the failure came from the pool or connection rather than the statement.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self.root(),
            ProductError::Query {
                source: DbErr::Conn(_) | DbErr::ConnectionAcquire(_),
                ..
            }
        )
    }
}

/// Attach call-site context to a failing result, in the spirit of `eyre::WrapErr`.
pub trait ResultExt<T> {
    fn context(self, context: &'static str) -> ProductResult<T>;
}

impl<T> ResultExt<T> for ProductResult<T> {
    fn context(self, context: &'static str) -> ProductResult<T> {
        self.map_err(|source| ProductError::Context {
            context,
            source: Box::new(source),
        })
    }
}

impl ProductError {
    /// Text safe to hand to a client: the context chain followed by the root
    /// error, with statement text and bound values left out.
    pub fn public_message(&self) -> String {
        match self {
            ProductError::Context { context, source } => {
                format!("{context}: {}", source.public_message())
            }
            ProductError::Query { .. } => "query failed".to_string(),
            ProductError::Decode { reason, .. } => format!("failed to decode product: {reason}"),
            other => other.to_string(),
        }
    }
}

/// Each failure kind gets its own status code; statement details stay in the logs.
impl From<ProductError> for Status {
    fn from(err: ProductError) -> Self {
        let code = match err.root() {
            ProductError::Validation(_) => Code::InvalidArgument,
            ProductError::NotFound(_) => Code::NotFound,
            ProductError::NoRowsAffected { .. } => Code::FailedPrecondition,
            ProductError::Decode { .. } => Code::DataLoss,
            ProductError::Query { .. } if err.is_connection_failure() => Code::Unavailable,
            ProductError::Query { .. } | ProductError::QueryBuild(_) => Code::Internal,
            ProductError::Context { .. } => Code::Unknown,
        };
        Status::new(code, err.public_message())
    }
}
