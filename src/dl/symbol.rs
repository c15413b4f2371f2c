use crate::dl::library::LibraryHandle;
use crate::error::{Error, Result};
use core::ffi::{c_char, c_void};
use core::marker::PhantomData;
use core::ptr::NonNull;
use core::str::Utf8Error;
use std::ffi::CStr;

/// Takes no arguments and returns null or a NUL-terminated UTF-8 buffer owned by the library.
pub type ListingFn = unsafe extern "C" fn() -> *const c_char;
/// Hands a buffer returned by a [`ListingFn`] back to the library's allocator.
pub type ReleaseFn = unsafe extern "C" fn(*mut c_char);

/// A listing export borrowed from a [`LibraryHandle`].
#[derive(Debug)]
pub struct CallableSymbol<'lib> {
    func: ListingFn,
    name: String,
    _library: PhantomData<&'lib LibraryHandle>,
}
impl<'lib> CallableSymbol<'lib> {
    /// # Safety
    /// `raw` must be the address of a function of signature [`ListingFn`] that stays mapped for
    /// `'lib`.
    pub(crate) unsafe fn from_raw(raw: NonNull<c_void>, name: &str) -> CallableSymbol<'lib> {
        CallableSymbol {
            func: core::mem::transmute::<*mut c_void, ListingFn>(raw.as_ptr()),
            name: name.to_string(),
            _library: PhantomData,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Calls the export and copies the returned text. The buffer itself is left with the library.
    pub fn invoke_and_decode(&self) -> Result<String> {
        self.invoke_and_decode_with(None)
    }
    /// Like [`invoke_and_decode`](Self::invoke_and_decode), then passes a non-null buffer to
    /// `release` once it has been copied, whether or not it decoded.
    pub fn invoke_and_decode_with(&self, release: Option<&ReleaseSymbol<'_>>) -> Result<String> {
        tracing::trace!(symbol = %self.name, "invoking native listing");
        let ptr = unsafe { (self.func)() };
        if ptr.is_null() {
            return Err(Error::NullResult {
                symbol: self.name.clone(),
            });
        }
        let decoded = unsafe { copy_c_str(ptr) };
        if let Some(release) = release {
            unsafe { release.release(ptr) };
        }
        decoded.map_err(|source| Error::Decoding {
            symbol: self.name.clone(),
            source,
        })
    }
}

#[derive(Debug)]
pub struct ReleaseSymbol<'lib> {
    func: ReleaseFn,
    name: String,
    _library: PhantomData<&'lib LibraryHandle>,
}
impl<'lib> ReleaseSymbol<'lib> {
    /// # Safety
    /// `raw` must be the address of a function of signature [`ReleaseFn`] that stays mapped for
    /// `'lib`.
    pub(crate) unsafe fn from_raw(raw: NonNull<c_void>, name: &str) -> ReleaseSymbol<'lib> {
        ReleaseSymbol {
            func: core::mem::transmute::<*mut c_void, ReleaseFn>(raw.as_ptr()),
            name: name.to_string(),
            _library: PhantomData,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// # Safety
    /// `ptr` must have been returned by the listing export this release export belongs to and
    /// must not be read afterwards.
    unsafe fn release(&self, ptr: *const c_char) {
        tracing::trace!(symbol = %self.name, "releasing native buffer");
        (self.func)(ptr as *mut c_char)
    }
}

/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated buffer that is valid for reads up to and
/// including the terminator.
unsafe fn copy_c_str(ptr: *const c_char) -> core::result::Result<String, Utf8Error> {
    let bytes = CStr::from_ptr(ptr).to_bytes();
    tracing::trace!(len = bytes.len(), "copying native buffer");
    core::str::from_utf8(bytes).map(str::to_owned)
}
