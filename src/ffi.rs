//! C-compatible JSON interface.
//!
//! # Memory Management
//!
//! - The request is a null-terminated UTF-8 JSON string
//! - Returned strings are allocated by Rust and must be freed with
//!   `tsp_free_string()`
//!
//! # Request
//!
//! ```json
//! {
//!   "locations": [{"index": 0, "name": "A"}, {"index": 1, "name": "B"}],
//!   "distances": [[0, 5], [5, 0]],
//!   "subset": ["A", "B"],
//!   "time_limit_ms": 1000,
//!   "config": {"formulation": "mtz"}
//! }
//! ```
//!
//! `subset`, `time_limit_ms` and `config` are optional. The response is
//! `{"result": {...}}` on success or `{"error": "..."}` on failure.

use std::ffi::{CStr, CString};
use std::ptr;
use std::time::Duration;

use libc::c_char;
use serde::Deserialize;
use serde_json::json;

use crate::config::SolverConfig;
use crate::models::Location;
use crate::tsp::TspSolver;

#[derive(Deserialize)]
struct FfiRequest {
    locations: Vec<Location>,
    distances: Vec<Vec<f64>>,
    #[serde(default)]
    subset: Option<Vec<String>>,
    #[serde(default)]
    time_limit_ms: Option<u64>,
    #[serde(default)]
    config: SolverConfig,
}

fn handle(request: &str) -> serde_json::Value {
    let request: FfiRequest = match serde_json::from_str(request) {
        Ok(r) => r,
        Err(e) => return json!({ "error": format!("invalid request: {e}") }),
    };
    let solver = TspSolver::new(request.config);
    let time_limit = request.time_limit_ms.map(Duration::from_millis);
    match solver.solve_table(request.locations, request.distances, request.subset, time_limit) {
        Ok(result) => json!({ "result": result }),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

/// Solves a JSON request and returns a JSON response.
///
/// # Returns
/// Allocated string that must be freed with `tsp_free_string()`, or NULL if
/// `request` is NULL or not valid UTF-8
///
/// # Safety
/// `request` must be NULL or point to a null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn tsp_solve_json(request: *const c_char) -> *mut c_char {
    if request.is_null() {
        return ptr::null_mut();
    }
    let request = match CStr::from_ptr(request).to_str() {
        Ok(s) => s,
        Err(_) => return ptr::null_mut(),
    };

    match CString::new(handle(request).to_string()) {
        Ok(c_string) => c_string.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Frees a string returned by `tsp_solve_json`.
///
/// # Safety
/// `ptr` must be NULL or a pointer returned by this library, freed once.
#[no_mangle]
pub unsafe extern "C" fn tsp_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
