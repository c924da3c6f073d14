//! The error taxonomy a specific-precision driver can report.
//!
//! Numerical-precision exhaustion and iteration-cap exhaustion are the only
//! two outcomes a specific-precision driver can report; both unwind as
//! `Err` rather than a bare sentinel return value. Invalid configuration
//! and shape mismatches remain `assert!`-style panics at the public
//! boundary: those are programming errors, not recoverable conditions.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LllError {
    /// Babai could not make progress at the current working precision.
    #[error("size reduction failed to converge at the current working precision")]
    NumericalFailure,

    /// The outer driver exhausted its iteration budget.
    #[error("LLL outer loop exceeded its iteration budget")]
    IterationCapExceeded,
}

pub type Result<T> = std::result::Result<T, LllError>;
