//! C ABI for the search drivers.
//!
//! Enabled with the `ffi` feature. The exported symbols mirror the Rust raw
//! entry points and take an element count rather than a byte length.
//!
//! # Example (C)
//!
//! ```c
//! #include <stdbool.h>
//! #include <stdint.h>
//! #include <stdio.h>
//!
//! bool lfind8(uint8_t key, const uint8_t *base, uint32_t nelem);
//! bool lfind8_le(uint8_t key, const uint8_t *base, uint32_t nelem);
//! bool lfind32(uint32_t key, const uint32_t *base, uint32_t nelem);
//! const char *lfind_backend_name(void);
//!
//! int main(void) {
//!     uint8_t odd[] = {1, 3, 5, 7, 9, 11, 13, 15};
//!     printf("%s: %d\n", lfind_backend_name(), lfind8(5, odd, 8));
//!     return 0;
//! }
//! ```
//!
//! # Safety
//!
//! When `nelem > 0`, `base` must point to at least `nelem` readable elements.
//! When `nelem == 0`, `base` may be null. No alignment is required.

use std::os::raw::c_char;

use crate::search;
use crate::simd::Backend;

/// Return true if any of the first `nelem` bytes at `base` equals `key`.
///
/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn lfind8(key: u8, base: *const u8, nelem: u32) -> bool {
    search::lfind8_raw(key, base, nelem)
}

/// Return true if any of the first `nelem` bytes at `base` is `<= key`.
///
/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn lfind8_le(key: u8, base: *const u8, nelem: u32) -> bool {
    search::lfind8_le_raw(key, base, nelem)
}

/// Return true if any of the first `nelem` words at `base` equals `key`.
///
/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn lfind32(key: u32, base: *const u32, nelem: u32) -> bool {
    search::lfind32_raw(key, base, nelem)
}

/// Name of the compiled backend as a static NUL-terminated string.
///
/// The pointer is valid for the lifetime of the process and must not be freed.
#[no_mangle]
pub extern "C" fn lfind_backend_name() -> *const c_char {
    let name: &'static [u8] = match Backend::current() {
        Backend::Sse2 => b"SSE2\0",
        Backend::Neon => b"NEON\0",
    };
    name.as_ptr() as *const c_char
}
