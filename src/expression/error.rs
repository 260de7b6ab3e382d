/// Syntax error in coordinate expression text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("bad coordinate at byte {offset}: {message}")]
pub struct ExprError {
    /// Byte offset into the (trimmed) source where the problem was detected.
    pub offset: usize,
    /// Human-readable description.
    pub message: String,
}

impl ExprError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}
