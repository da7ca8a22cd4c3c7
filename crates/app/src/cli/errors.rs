use serde_json::{Value, json};
use sqlx::migrate::MigrateError;
use thiserror::Error;
use trolley_app::{
    context::AppInitError,
    domain::{
        ErrorKind, carts::CartsServiceError, catalog::CatalogServiceError,
        checkout::CheckoutServiceError, users::UsersServiceError,
    },
};

#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error("missing database url; pass --database-url or set DATABASE_URL")]
    MissingDatabaseUrl,

    #[error("failed to connect to database")]
    Connect(#[source] sqlx::Error),

    #[error(transparent)]
    Init(#[from] AppInitError),

    #[error("failed to apply migrations")]
    Migrate(#[from] MigrateError),

    #[error("{message}")]
    Service { kind: ErrorKind, message: String },

    #[error("product not found")]
    ProductNotFound,

    #[error("failed to encode output")]
    Output(#[from] serde_json::Error),
}

impl CommandError {
    pub(crate) fn kind(&self) -> ErrorKind {
        match self {
            Self::Service { kind, .. } => *kind,
            Self::ProductNotFound => ErrorKind::NotFound,
            Self::MissingDatabaseUrl
            | Self::Connect(_)
            | Self::Init(_)
            | Self::Migrate(_)
            | Self::Output(_) => ErrorKind::InternalError,
        }
    }

    /// The error as printed on stderr.
    pub(crate) fn to_json(&self) -> Value {
        json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
            }
        })
    }
}

macro_rules! impl_from_service_error {
    ($($error:ty),+ $(,)?) => {
        $(
            impl From<$error> for CommandError {
                fn from(error: $error) -> Self {
                    Self::Service {
                        kind: error.kind(),
                        message: error.to_string(),
                    }
                }
            }
        )+
    };
}

impl_from_service_error!(
    CartsServiceError,
    CatalogServiceError,
    CheckoutServiceError,
    UsersServiceError,
);
