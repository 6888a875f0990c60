use thiserror::Error;

pub type Result<T> = std::result::Result<T, CollaboratorError>;

/// Failures reported by collaborators (persistence, hints, settings).
///
/// None of these are fatal: the session stays usable and its local state is
/// left as it was before the failed call.
#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request rejected: {message}")]
    Rejected { message: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("local storage error: {0}")]
    Storage(#[from] redb::Error),

    #[error("invalid payload: {0}")]
    Invalid(String),
}

impl CollaboratorError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CollaboratorError {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e.to_string())
    }
}

macro_rules! storage_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for CollaboratorError {
                fn from(e: $ty) -> Self {
                    Self::Storage(e.into())
                }
            }
        )*
    };
}

storage_from!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);
