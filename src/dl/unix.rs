use core::ffi::c_void;
use core::ptr::NonNull;
use std::ffi::{CStr, CString};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// `dlopen` searches the system library path for names without a `/`. A bare file name is
/// anchored to the working directory so only that file is opened.
pub fn loader_path(path: &Path) -> PathBuf {
    if path.as_os_str().as_bytes().contains(&b'/') {
        path.to_path_buf()
    } else {
        Path::new(".").join(path)
    }
}

pub fn open(path: &Path) -> Result<NonNull<c_void>, String> {
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| "path contains a NUL byte".to_string())?;
    let handle = unsafe { libc::dlopen(c_path.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL) };
    NonNull::new(handle).ok_or_else(last_error)
}

pub fn symbol(handle: NonNull<c_void>, name: &CStr) -> Result<NonNull<c_void>, String> {
    unsafe {
        // Clear any stale message so the one read below belongs to this lookup.
        libc::dlerror();
        NonNull::new(libc::dlsym(handle.as_ptr(), name.as_ptr())).ok_or_else(last_error)
    }
}

/// # Safety
/// `handle` must come from `open` and must not be used afterwards.
pub unsafe fn close(handle: NonNull<c_void>) -> Result<(), String> {
    match libc::dlclose(handle.as_ptr()) {
        0 => Ok(()),
        _ => Err(last_error()),
    }
}

fn last_error() -> String {
    unsafe {
        let msg = libc::dlerror();
        if msg.is_null() {
            "unknown dynamic loader error".to_string()
        } else {
            CStr::from_ptr(msg).to_string_lossy().into_owned()
        }
    }
}
