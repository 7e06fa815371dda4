//! Compile errors
//!
//! One tagged error type for the whole pipeline. Failures that cross a
//! composition boundary (an import or an extends) carry the inner failure as
//! an explicit boxed `cause` rather than flattening it into a message, so
//! callers can walk the chain and read an accurate file and line at every
//! level. The chain is also surfaced through `std::error::Error::source`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    /// The loader could not resolve a template name to a source.
    #[error("template \"{name}\" could not be loaded: {message}")]
    Loader { name: String, message: String },

    /// No grammar matched, or a construct is malformed or unterminated.
    /// The line always points at the start of the offending construct.
    #[error("{path}:{line}: {message}")]
    Syntax {
        path: String,
        line: u32,
        message: String,
    },

    /// An import statement failed: either the edge set has a cycle (no
    /// cause) or the imported template failed to compile (cause preserved).
    #[error("{path}:{line}: import of \"{template}\" failed: {message}")]
    Import {
        path: String,
        line: u32,
        template: String,
        message: String,
        #[source]
        cause: Option<Box<CompileError>>,
    },

    /// An extends declaration failed: parent missing, parent failed to
    /// compile, or the child overrides a block the parent does not define.
    #[error("{path}:{line}: extending \"{parent}\" failed: {message}")]
    Extends {
        path: String,
        line: u32,
        parent: String,
        message: String,
        #[source]
        cause: Option<Box<CompileError>>,
    },

    /// A dynamic block referenced a directive the registry does not know,
    /// or a known directive rejected its arguments.
    #[error("{path}:{line}: directive \"{name}\": {message}")]
    Directive {
        path: String,
        line: u32,
        name: String,
        message: String,
    },
}

impl CompileError {
    /// File identity of the template-level statement that raised this error,
    /// if the variant carries one.
    pub fn file(&self) -> Option<&str> {
        match self {
            CompileError::Loader { .. } => None,
            CompileError::Syntax { path, .. }
            | CompileError::Import { path, .. }
            | CompileError::Extends { path, .. }
            | CompileError::Directive { path, .. } => Some(path),
        }
    }

    /// 1-based line of the statement that raised this error.
    pub fn line(&self) -> Option<u32> {
        match self {
            CompileError::Loader { .. } => None,
            CompileError::Syntax { line, .. }
            | CompileError::Import { line, .. }
            | CompileError::Extends { line, .. }
            | CompileError::Directive { line, .. } => Some(*line),
        }
    }

    /// The wrapped inner failure, when this error marks a composition
    /// boundary.
    pub fn cause(&self) -> Option<&CompileError> {
        match self {
            CompileError::Import { cause, .. } | CompileError::Extends { cause, .. } => {
                cause.as_deref()
            }
            CompileError::Loader { .. }
            | CompileError::Syntax { .. }
            | CompileError::Directive { .. } => None,
        }
    }

    /// Walks to the deepest error in the cause chain.
    pub fn root_cause(&self) -> &CompileError {
        let mut current = self;
        while let Some(inner) = current.cause() {
            current = inner;
        }
        current
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
