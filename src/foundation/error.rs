use crate::expression::error::ExprError;

/// Convenience result type used across relgeom.
pub type GeomResult<T> = Result<T, GeomError>;

/// Top-level error taxonomy used by resolution and layout APIs.
#[derive(thiserror::Error, Debug)]
pub enum GeomError {
    /// A coordinate referenced a symbol the evaluation context cannot supply.
    #[error("lookup error: unresolved symbol '{symbol}'")]
    Lookup {
        /// The symbol as written, including any `.member` suffix.
        symbol: String,
    },

    /// Malformed coordinate or expression text.
    #[error("parse error: {0}")]
    Parse(#[from] ExprError),

    /// Errors while evaluating an otherwise well-formed expression.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Misuse of the node tree API.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing persisted state.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GeomError {
    /// Build a [`GeomError::Lookup`] value.
    pub fn lookup(symbol: impl Into<String>) -> Self {
        Self::Lookup {
            symbol: symbol.into(),
        }
    }

    /// Build a [`GeomError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`GeomError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GeomError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for unresolved-symbol failures.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
