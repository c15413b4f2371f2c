//! Where the native library lives and which of its exports to call.
use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::{Path, PathBuf};

pub const DEFAULT_LIBRARY_DIR: &str = "libs";
pub const DEFAULT_LIBRARY_NAME: &str = "usbcopy";
pub const DEFAULT_SYMBOL: &str = "rusb_list";

/// `libs/libusbcopy.so` on Linux, `libs/usbcopy.dll` on Windows.
pub fn default_library_path() -> PathBuf {
    Path::new(DEFAULT_LIBRARY_DIR).join(format!(
        "{}{}{}",
        DLL_PREFIX, DEFAULT_LIBRARY_NAME, DLL_SUFFIX
    ))
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BridgeConfig {
    pub library_path: PathBuf,
    /// Export of signature `extern "C" fn() -> *const c_char`.
    pub symbol: String,
    /// Export of signature `extern "C" fn(*mut c_char)` that takes back the buffer returned by
    /// `symbol`. `None` leaves the buffer with the native side untouched.
    pub release_symbol: Option<String>,
}
impl BridgeConfig {
    pub fn new(library_path: impl Into<PathBuf>) -> BridgeConfig {
        BridgeConfig {
            library_path: library_path.into(),
            ..BridgeConfig::default()
        }
    }
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> BridgeConfig {
        self.symbol = symbol.into();
        self
    }
    pub fn with_release_symbol(mut self, release_symbol: impl Into<String>) -> BridgeConfig {
        self.release_symbol = Some(release_symbol.into());
        self
    }
}
impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            library_path: default_library_path(),
            symbol: DEFAULT_SYMBOL.to_string(),
            release_symbol: None,
        }
    }
}
