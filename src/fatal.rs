//! Opt-in fail-fast handling for short-lived batch programs.
//!
//! The library itself never aborts: contract violations come back as
//! `Result`s. Programs where continuing after a logic bug is not meaningful
//! can collapse those results with [`OrAbort::or_abort`].

use std::fmt;
use std::process;

/// Unwrap-or-abort. The diagnostic goes to stderr before the abort.
pub trait OrAbort<T> {
    fn or_abort(self) -> T;
}

impl<T, E: fmt::Display> OrAbort<T> for Result<T, E> {
    fn or_abort(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{e}");
                process::abort();
            }
        }
    }
}
