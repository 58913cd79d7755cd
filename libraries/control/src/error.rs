use thiserror::Error;

use crate::Real;

/// Errors raised while constructing a controller or gain block.
///
/// Per-tick calls never fail; every parameter is checked once, up front, so a
/// loop never runs with a degenerate law.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ControlError {
    /// Output bounds are inverted or NaN
    #[error("Invalid output limits: min value {min} must not exceed max value {max}")]
    InvalidLimits { min: f64, max: f64 },

    /// A gain, weight, timestep or reset value is NaN or infinite
    #[error("Parameter {0} is not a finite number")]
    NonFiniteParameter(&'static str),

    /// Timestep is negative, or zero while integral/derivative/tracking action is configured
    #[error("Invalid timestep {dt}: integral, derivative and tracking action require dt > 0")]
    InvalidTimestep { dt: f64 },

    /// Derivative filter coefficient cannot produce a usable filter
    #[error("Invalid derivative filter: {0}")]
    InvalidFilter(&'static str),
}

/// Result type for construction of control blocks
pub type ControlResult<T> = Result<T, ControlError>;

pub(crate) fn to_f64<T: Real>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

pub(crate) fn check_finite<T: Real>(value: T, name: &'static str) -> ControlResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ControlError::NonFiniteParameter(name))
    }
}

/// Bounds may be infinite (an unbounded side) but never NaN or inverted.
pub(crate) fn check_limits<T: Real>(min: T, max: T) -> ControlResult<()> {
    if min.is_nan() || max.is_nan() || min > max {
        return Err(ControlError::InvalidLimits {
            min: to_f64(min),
            max: to_f64(max),
        });
    }
    Ok(())
}
