use crate::arena::AllocError;

/// Error taxonomy for binding and assignment operations
///
/// Every kind is logged at error severity where it arises and degraded to a
/// benign sentinel at the call site; the `Result` forms exist so callers
/// *may* branch, not because they must. The one escalation is arena
/// exhaustion inside `ref_attr`, which runs the shutdown hook instead of
/// returning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// Name absent from every searched scope
    NotFound { name: String },
    /// Redefinition of an existing name (random variable definition)
    AlreadyDefined { name: String },
    /// Operation not permitted for the variable's kind
    WrongKind { name: String },
    /// Shared arena exhausted
    Alloc(AllocError),
    /// No provider matched a `{...}` name, or a `(...)` name is not in the
    /// environment
    UnresolvedSpecial { name: String },
}

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindError::NotFound { name } => {
                write!(f, "cannot find variable ${}", name)
            }
            BindError::AlreadyDefined { name } => {
                write!(f, "variable name already in use: ${}", name)
            }
            BindError::WrongKind { name } => {
                write!(f, "wrong variable kind for operation: ${}", name)
            }
            BindError::Alloc(e) => write!(f, "{}", e),
            BindError::UnresolvedSpecial { name } => {
                write!(f, "cannot resolve special variable {}", name)
            }
        }
    }
}

impl std::error::Error for BindError {}

impl From<AllocError> for BindError {
    fn from(e: AllocError) -> Self {
        BindError::Alloc(e)
    }
}
