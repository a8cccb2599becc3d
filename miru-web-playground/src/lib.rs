//! Embedding API for running the Miru compiler inside a host program.
//!
//! The host passes source text in and gets back self-contained C (the
//! runtime print functions are inlined) or an `Error: ` line. Every call
//! owns its own buffers, so concurrent calls do not interact.

use std::ffi::{CStr, CString, c_char};

use miru_core::{CoreError, EmitOptions, compile};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("no source text was provided")]
    NullInput,
    #[error("source is not valid UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("output contains an interior NUL byte")]
    InteriorNul(#[from] std::ffi::NulError),
    #[error(transparent)]
    Core(#[from] CoreError),
}

pub fn try_compile(source: &str) -> Result<String, PlaygroundError> {
    Ok(compile(source, &EmitOptions::standalone())?.c_source)
}

/// Generated C on success, `Error: <message>` on failure.
pub fn compile_for_playground(source: &str) -> String {
    match try_compile(source) {
        Ok(c_source) => c_source,
        Err(err) => error_text(&err),
    }
}

fn error_text(err: &PlaygroundError) -> String {
    format!("Error: {err}")
}

fn compile_c_str(source: *const c_char) -> Result<String, PlaygroundError> {
    if source.is_null() {
        return Err(PlaygroundError::NullInput);
    }
    // SAFETY: non-null and, per the `miru_compile` contract, NUL-terminated.
    let source = unsafe { CStr::from_ptr(source) }.to_str()?;
    try_compile(source)
}

fn into_raw(text: String) -> *mut c_char {
    let owned = CString::new(text)
        .or_else(|err| CString::new(error_text(&PlaygroundError::InteriorNul(err))));
    match owned {
        Ok(owned) => owned.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Compile a NUL-terminated source string.
///
/// Always returns a newly allocated string that must be released with
/// [`miru_free_result`].
///
/// # Safety
///
/// `source` must be null or point to a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn miru_compile(source: *const c_char) -> *mut c_char {
    let text = match compile_c_str(source) {
        Ok(c_source) => c_source,
        Err(err) => error_text(&err),
    };
    into_raw(text)
}

/// Release a string returned by [`miru_compile`]. Null is accepted.
///
/// # Safety
///
/// `result` must be null or a pointer obtained from `miru_compile` that
/// has not been freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn miru_free_result(result: *mut c_char) {
    if result.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(result) });
}

const VERSION_NUL: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

/// Compiler version as a static NUL-terminated string. Do not free.
#[unsafe(no_mangle)]
pub extern "C" fn miru_version() -> *const c_char {
    VERSION_NUL.as_ptr().cast()
}
