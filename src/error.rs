use thiserror::Error;

/// Raised by the parser when the template grammar is violated.
///
/// Parsing is all-or-nothing: a `ParseError` means no AST was produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A specific token was required but something else (or end of input)
    /// was found, e.g. a `}}` that never arrives or a ternary missing its
    /// `:`.
    #[error("expected {expected}, got {found}")]
    Expected { expected: String, found: String },

    /// A token that cannot start a primary expression showed up where a
    /// value was required.
    #[error("unexpected token: {found}")]
    UnexpectedToken { found: String },
}

/// Raised during evaluation. The only fatal evaluation condition is a pipe
/// referencing a filter that was never registered; everything else (missing
/// variables, odd placeholder content) degrades to empty output instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unknown filter: {0}")]
    UnknownFilter(String),
}

/// Either failure mode of a full `render` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}
