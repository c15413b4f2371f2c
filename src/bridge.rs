use crate::config::BridgeConfig;
use crate::dl::{CallableSymbol, LibraryHandle, ReleaseSymbol};
use crate::error::Result;

/// A loaded usbcopy library whose configured exports are known to exist.
#[derive(Debug)]
pub struct NativeListingBridge {
    library: LibraryHandle,
    config: BridgeConfig,
}
impl NativeListingBridge {
    /// Loads the library and checks that every configured export resolves, so a wrong symbol
    /// name fails here rather than on the first listing.
    pub fn open(config: BridgeConfig) -> Result<NativeListingBridge> {
        let library = LibraryHandle::load(&config.library_path)?;
        let bridge = NativeListingBridge { library, config };
        bridge.symbols()?;
        Ok(bridge)
    }
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
    pub fn library(&self) -> &LibraryHandle {
        &self.library
    }
    /// Calls the listing export and returns an owned copy of its text.
    pub fn list(&self) -> Result<String> {
        let (listing, release) = self.symbols()?;
        let text = listing.invoke_and_decode_with(release.as_ref())?;
        tracing::debug!(symbol = listing.name(), len = text.len(), "received listing");
        Ok(text)
    }
    fn symbols(&self) -> Result<(CallableSymbol<'_>, Option<ReleaseSymbol<'_>>)> {
        // SAFETY: the configured exports follow the usbcopy contract. `symbol` is
        // `() -> *const c_char` returning null or a NUL-terminated buffer, and `release_symbol`
        // is `(*mut c_char)` taking back that buffer.
        unsafe {
            let listing = self.library.resolve(&self.config.symbol)?;
            let release = match &self.config.release_symbol {
                Some(name) => Some(self.library.resolve_release(name)?),
                None => None,
            };
            Ok((listing, release))
        }
    }
}

/// Load, resolve and invoke once. The library is unloaded before this returns.
pub fn fetch_listing(config: &BridgeConfig) -> Result<String> {
    NativeListingBridge::open(config.clone())?.list()
}
