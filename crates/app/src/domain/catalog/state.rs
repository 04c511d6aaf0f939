//! Fetch state.

/// Lifecycle of a fetched collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState<T> {
    /// Never fetched
    #[default]
    Idle,

    /// A fetch is in flight
    Loading,

    /// The last fetch succeeded
    Success(T),

    /// The last fetch failed
    Error(String),
}

impl<T> FetchState<T> {
    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Data from the last successful fetch.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Message from the last failed fetch.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Map the loaded data, keeping the state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            Self::Idle => FetchState::Idle,
            Self::Loading => FetchState::Loading,
            Self::Success(data) => FetchState::Success(f(data)),
            Self::Error(message) => FetchState::Error(message),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for FetchState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(error) => Self::Error(error.to_string()),
        }
    }
}
