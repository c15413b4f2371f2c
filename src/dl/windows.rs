use core::ffi::c_void;
use core::ptr::NonNull;
use std::ffi::CStr;
use std::os::windows::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use winapi::shared::minwindef::HMODULE;
use winapi::um::errhandlingapi::GetLastError;
use winapi::um::libloaderapi::{FreeLibrary, GetProcAddress, LoadLibraryW};

pub fn loader_path(path: &Path) -> PathBuf {
    path.to_path_buf()
}

pub fn open(path: &Path) -> Result<NonNull<c_void>, String> {
    let mut wide: Vec<u16> = path.as_os_str().encode_wide().collect();
    if wide.contains(&0) {
        return Err("path contains a NUL character".to_string());
    }
    wide.push(0);
    let handle = unsafe { LoadLibraryW(wide.as_ptr()) };
    NonNull::new(handle as *mut c_void).ok_or_else(last_error)
}

pub fn symbol(handle: NonNull<c_void>, name: &CStr) -> Result<NonNull<c_void>, String> {
    let address = unsafe { GetProcAddress(handle.as_ptr() as HMODULE, name.as_ptr()) };
    NonNull::new(address as *mut c_void).ok_or_else(last_error)
}

/// # Safety
/// `handle` must come from `open` and must not be used afterwards.
pub unsafe fn close(handle: NonNull<c_void>) -> Result<(), String> {
    match FreeLibrary(handle.as_ptr() as HMODULE) {
        0 => Err(last_error()),
        _ => Ok(()),
    }
}

fn last_error() -> String {
    let code = unsafe { GetLastError() };
    std::io::Error::from_raw_os_error(code as i32).to_string()
}
