use crate::dl::symbol::{CallableSymbol, ReleaseSymbol};
use crate::dl::sys;
use crate::error::{Error, Result};
use core::ffi::c_void;
use core::ptr::NonNull;
use std::ffi::CString;
use std::path::{Path, PathBuf};

/// A loaded dynamic library. Unloaded exactly once, when dropped.
///
/// Not `Send` or `Sync`: nothing is known about the thread-safety of the code it maps.
#[derive(Debug)]
pub struct LibraryHandle {
    raw: NonNull<c_void>,
    path: PathBuf,
}
impl LibraryHandle {
    /// Maps the library at `path` into the process. The library's initializers run here.
    pub fn load(path: impl AsRef<Path>) -> Result<LibraryHandle> {
        let path = path.as_ref();
        match path.try_exists() {
            Ok(true) => {}
            Ok(false) => {
                return Err(Error::LibraryNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => {
                return Err(Error::LibraryLoad {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        }
        let loader_path = sys::loader_path(path);
        tracing::debug!(path = %loader_path.display(), "loading native library");
        let raw = sys::open(&loader_path).map_err(|reason| Error::LibraryLoad {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(LibraryHandle {
            raw,
            path: path.to_path_buf(),
        })
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    /// Resolves an export of signature [`ListingFn`](crate::dl::ListingFn).
    /// # Safety
    /// The export named `symbol` must actually have that signature and must return either null or
    /// a NUL-terminated buffer that stays valid until the next call into the library.
    pub unsafe fn resolve(&self, symbol: &str) -> Result<CallableSymbol<'_>> {
        let raw = self.lookup(symbol)?;
        tracing::debug!(symbol, path = %self.path.display(), "resolved listing symbol");
        Ok(CallableSymbol::from_raw(raw, symbol))
    }
    /// Resolves an export of signature [`ReleaseFn`](crate::dl::ReleaseFn).
    /// # Safety
    /// The export named `symbol` must actually have that signature and must accept the buffers
    /// returned by the listing symbol it is paired with.
    pub unsafe fn resolve_release(&self, symbol: &str) -> Result<ReleaseSymbol<'_>> {
        let raw = self.lookup(symbol)?;
        tracing::debug!(symbol, path = %self.path.display(), "resolved release symbol");
        Ok(ReleaseSymbol::from_raw(raw, symbol))
    }
    pub fn has_symbol(&self, symbol: &str) -> bool {
        match self.lookup(symbol) {
            Ok(_) => true,
            Err(e) => {
                tracing::trace!(symbol, reason = %e, "symbol probe failed");
                false
            }
        }
    }
    fn lookup(&self, symbol: &str) -> Result<NonNull<c_void>> {
        let name = CString::new(symbol).map_err(|_| Error::SymbolNotFound {
            symbol: symbol.to_string(),
            reason: "name contains a NUL byte".to_string(),
        })?;
        sys::symbol(self.raw, &name).map_err(|reason| Error::SymbolNotFound {
            symbol: symbol.to_string(),
            reason,
        })
    }
}
impl Drop for LibraryHandle {
    fn drop(&mut self) {
        if let Err(reason) = unsafe { sys::close(self.raw) } {
            tracing::warn!(path = %self.path.display(), %reason, "failed to unload native library");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = LibraryHandle::load(dir.path().join("libmissing.so")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LibraryNotFound);
    }

    #[test]
    fn unreadable_path_is_a_load_error() {
        // metadata rejects the NUL byte, so existence cannot be decided
        let err = LibraryHandle::load("libs/lib\0usbcopy.so").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LibraryLoadError);
    }

    #[cfg(unix)]
    #[test]
    fn untraversable_directory_is_a_load_error() {
        use std::os::unix::fs::PermissionsExt;

        // root bypasses directory permissions
        if unsafe { libc::geteuid() } == 0 {
            return;
        }
        let dir = tempfile::tempdir().expect("tempdir");
        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).expect("create dir");
        std::fs::write(locked.join("libusbcopy.so"), b"").expect("write");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000))
            .expect("chmod");

        let err = LibraryHandle::load(locked.join("libusbcopy.so")).unwrap_err();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o700))
            .expect("chmod back");
        assert_eq!(err.kind(), ErrorKind::LibraryLoadError);
    }

    #[test]
    fn directory_is_not_loadable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = LibraryHandle::load(dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LibraryLoadError);
    }
}
