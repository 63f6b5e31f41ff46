pub type Result<T> = std::result::Result<T, ParseError>;

/// Lexical failure while reading path data or a transform list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenizerError {
    #[error("malformed number {literal:?} at offset {offset}")]
    MalformedNumber { literal: String, offset: usize },

    #[error("expected {expected} at offset {offset}, found {found}")]
    Expected {
        expected: String,
        found: String,
        offset: usize,
    },
}

impl TokenizerError {
    /// Byte offset into the input where the failure was detected.
    pub fn offset(&self) -> usize {
        match self {
            TokenizerError::MalformedNumber { offset, .. } => *offset,
            TokenizerError::Expected { offset, .. } => *offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),

    #[error("unsupported path command {command:?} at offset {offset}")]
    UnsupportedCommand { command: String, offset: usize },

    #[error("unknown transform {name:?} at offset {offset}")]
    UnknownTransform { name: String, offset: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Tokenizer(err) => err.offset(),
            ParseError::UnsupportedCommand { offset, .. } => *offset,
            ParseError::UnknownTransform { offset, .. } => *offset,
        }
    }
}

/// Edit that a [`crate::Polygon`] holding curves or several subpaths cannot take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PolygonError {
    #[error("cannot {operation} a polygon that contains curves")]
    HasCurves { operation: &'static str },

    #[error("cannot {operation} a polygon with more than one subpath")]
    HasSubpaths { operation: &'static str },
}
