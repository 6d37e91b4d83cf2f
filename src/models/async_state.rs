use crate::error::AuthError;

/// Status of one asynchronous attempt.
///
/// Each attempt moves forward only: `Idle -> Loading -> (Ready | Failed)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AsyncState<T> {
    /// Not started yet
    #[default]
    Idle,
    /// Awaiting the result
    Loading,
    /// Settled with an error
    Failed(AuthError),
    /// Settled with a value
    Ready(T),
}

impl<T> AsyncState<T> {
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub const fn error(&self) -> Option<&AuthError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<Result<T, AuthError>> for AsyncState<T> {
    fn from(result: Result<T, AuthError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err),
        }
    }
}
