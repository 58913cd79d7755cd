//! # Control - discrete-time feedback primitives
//!
//! A PID compensator with filtered derivative, clamping anti-windup,
//! setpoint weighting and tracking anti-windup, plus a saturated gain block.
//! Both are meant to be called once per tick from a fixed-rate loop: no
//! allocation, no I/O, constant time.
//!
//! Precision is picked by the caller through the type parameter (`f32` on
//! most flight controllers, `f64` on the host).
//!
//! ```
//! use control::{Gain64, Pid32, PidConfig};
//!
//! let mut pid = Pid32::new(PidConfig::proportional(2.0, -1.0, 1.0)).unwrap();
//! assert_eq!(pid.update(3.0, 1.0), 1.0);
//!
//! let mut gain = Gain64::new(2.0, -1.0, 10.0).unwrap();
//! assert_eq!(gain.run(3.0), 6.0);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

use core::fmt;

use num_traits::float::FloatCore;

mod config;
mod error;
mod gain;
mod pid;

pub use config::{DerivativeFilter, PidConfig, Terms};
pub use error::{ControlError, ControlResult};
pub use gain::GainBlock;
pub use pid::{PidController, PidDiagnostics};

/// Floating-point working precision of the control blocks.
///
/// Implemented for every `FloatCore` type that can be debug-printed, which
/// covers `f32` and `f64`.
pub trait Real: FloatCore + fmt::Debug {}

impl<T> Real for T where T: FloatCore + fmt::Debug {}

pub type Pid32 = PidController<f32>;
pub type Pid64 = PidController<f64>;
pub type Gain32 = GainBlock<f32>;
pub type Gain64 = GainBlock<f64>;

pub(crate) fn clamp<T: Real>(value: T, min: T, max: T) -> T {
    if value > max {
        max
    } else if value < min {
        min
    } else {
        value
    }
}
