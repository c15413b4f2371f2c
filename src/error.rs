use core::fmt;
use std::path::PathBuf;
use std::str::Utf8Error;

/// The step of the load → resolve → invoke sequence an error came from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Stage {
    Load,
    Resolve,
    Invoke,
}
impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Resolve => "resolve",
            Stage::Invoke => "invoke",
        }
    }
}
impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// No file at the library path.
    LibraryNotFound,

    /// The file exists but the platform loader rejected it.
    LibraryLoadError,

    /// The library does not export the requested symbol.
    SymbolNotFound,

    /// The native call returned a null pointer.
    NullResult,

    /// The returned bytes are not valid UTF-8.
    DecodingError,
}
impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::LibraryNotFound => "Library not found",
            ErrorKind::LibraryLoadError => "Library could not be loaded",
            ErrorKind::SymbolNotFound => "Symbol not found",
            ErrorKind::NullResult => "Native call returned null",
            ErrorKind::DecodingError => "Native result is not valid UTF-8",
        }
    }
    pub fn stage(self) -> Stage {
        match self {
            ErrorKind::LibraryNotFound | ErrorKind::LibraryLoadError => Stage::Load,
            ErrorKind::SymbolNotFound => Stage::Resolve,
            ErrorKind::NullResult | ErrorKind::DecodingError => Stage::Invoke,
        }
    }
}
impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("library not found at {}", path.display())]
    LibraryNotFound { path: PathBuf },

    #[error("failed to load library {}: {reason}", path.display())]
    LibraryLoad { path: PathBuf, reason: String },

    #[error("symbol `{symbol}` not found: {reason}")]
    SymbolNotFound { symbol: String, reason: String },

    #[error("`{symbol}` returned a null pointer")]
    NullResult { symbol: String },

    #[error("`{symbol}` returned invalid UTF-8: {source}")]
    Decoding {
        symbol: String,
        #[source]
        source: Utf8Error,
    },
}
impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::LibraryNotFound { .. } => ErrorKind::LibraryNotFound,
            Error::LibraryLoad { .. } => ErrorKind::LibraryLoadError,
            Error::SymbolNotFound { .. } => ErrorKind::SymbolNotFound,
            Error::NullResult { .. } => ErrorKind::NullResult,
            Error::Decoding { .. } => ErrorKind::DecodingError,
        }
    }
    pub fn stage(&self) -> Stage {
        self.kind().stage()
    }
}

pub type Result<T> = core::result::Result<T, Error>;
