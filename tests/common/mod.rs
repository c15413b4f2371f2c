#![allow(dead_code)]

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

static STUB: OnceLock<PathBuf> = OnceLock::new();

/// Builds `tests/stub/listing_stub.rs` into a cdylib once per test binary and returns its path.
pub fn stub_library() -> &'static Path {
    STUB.get_or_init(|| {
        let out_dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join(env!("CARGO_CRATE_NAME"));
        std::fs::create_dir_all(&out_dir).expect("create stub output dir");
        let out = out_dir.join(format!("{}usbcopy_stub{}", DLL_PREFIX, DLL_SUFFIX));
        let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/stub/listing_stub.rs");
        let rustc = std::env::var_os("RUSTC").unwrap_or_else(|| "rustc".into());
        let status = Command::new(rustc)
            .args(["--crate-type", "cdylib", "--edition", "2021", "--crate-name", "usbcopy_stub"])
            .arg("-o")
            .arg(&out)
            .arg(&source)
            .status()
            .expect("run rustc");
        assert!(status.success(), "failed to build {}", source.display());
        out
    })
}

/// A file with a library suffix whose contents no loader accepts.
pub fn garbage_library() -> tempfile::NamedTempFile {
    let file = tempfile::Builder::new()
        .prefix("libgarbage")
        .suffix(DLL_SUFFIX)
        .tempfile()
        .expect("tempfile");
    std::fs::write(file.path(), b"this is not a shared object").expect("write garbage");
    file
}
