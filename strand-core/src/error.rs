use thiserror::Error;

/// Failure of a checked list operation.
///
/// The unchecked surface (`get`, `insert`, `pop`, ...) reports the same
/// conditions as `None`/`false`; the `try_*` variants return this error so the
/// caller can see which position was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("index {index} is out of range for a list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("list is empty")]
    Empty,
}

pub type ListResult<T> = Result<T, ListError>;
