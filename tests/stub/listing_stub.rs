//! Stand-in for the usbcopy native library, compiled as a cdylib by the integration tests.
use std::ffi::CString;
use std::os::raw::c_char;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

static HELLO: &[u8] = b"hello\0";
static NOT_UTF8: &[u8] = b"caf\xE9\0";
static RELEASED: AtomicU32 = AtomicU32::new(0);
static RELEASED_TEXT: Mutex<Option<CString>> = Mutex::new(None);

#[no_mangle]
pub extern "C" fn rusb_list() -> *const c_char {
    HELLO.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn null_list() -> *const c_char {
    std::ptr::null()
}

#[no_mangle]
pub extern "C" fn latin1_list() -> *const c_char {
    NOT_UTF8.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn owned_list() -> *mut c_char {
    CString::new("Bus 001 Device 002 ID 1d6b:0002")
        .map(CString::into_raw)
        .unwrap_or(std::ptr::null_mut())
}

#[no_mangle]
pub extern "C" fn owned_latin1_list() -> *mut c_char {
    CString::new(b"caf\xE9".to_vec())
        .map(CString::into_raw)
        .unwrap_or(std::ptr::null_mut())
}

#[no_mangle]
pub unsafe extern "C" fn owned_list_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
        RELEASED.fetch_add(1, Ordering::SeqCst);
    }
}

/// Number of buffers handed back through `owned_list_free`, as decimal text. The buffer stays
/// valid until the next call.
#[no_mangle]
pub extern "C" fn released_count_list() -> *const c_char {
    let text = CString::new(RELEASED.load(Ordering::SeqCst).to_string()).unwrap_or_default();
    let mut slot = RELEASED_TEXT.lock().unwrap_or_else(|e| e.into_inner());
    slot.insert(text).as_ptr()
}
