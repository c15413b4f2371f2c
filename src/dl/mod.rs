//! The unsafe boundary around the platform dynamic loader.
//!
//! Everything that touches a raw library handle, a raw symbol address or a pointer returned by
//! native code lives in this module. What leaves it is owned Rust data.
pub mod library;
pub mod symbol;

#[cfg(unix)]
#[path = "unix.rs"]
mod sys;
#[cfg(windows)]
#[path = "windows.rs"]
mod sys;

pub use library::LibraryHandle;
pub use symbol::{CallableSymbol, ListingFn, ReleaseFn, ReleaseSymbol};
