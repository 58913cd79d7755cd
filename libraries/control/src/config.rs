// Tuning parameters for the PID controller
use log::warn;

use crate::error::{check_finite, check_limits, to_f64, ControlError, ControlResult};
use crate::Real;

/// Parameterization of the first-order derivative filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DerivativeFilter<T> {
    /// Filter bandwidth `n`: `yd = (kd*u - dstate) * n`
    Bandwidth(T),
    /// Filter time constant `tf`: `yd = (kd*u - dstate) / (tf + dt)`
    TimeConstant(T),
}

/// Which terms of the control law a configuration activates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Terms {
    pub has_integral: bool,
    pub has_derivative: bool,
    pub has_setpoint_weighting: bool,
    pub has_tracking: bool,
}

/// Immutable parameter set of a [`PidController`](crate::PidController).
///
/// Start from one of the profiles ([`proportional`](Self::proportional),
/// [`pi`](Self::pi), [`pi_tracking`](Self::pi_tracking), [`pid`](Self::pid))
/// and refine it with the `with_*` methods. Gains that are not given default
/// to values that disable their term.
///
/// Nothing is checked until [`validate`](Self::validate) runs, which
/// `PidController::new` does for you.
///
/// # Example
///
/// ```
/// use control::{PidConfig, PidController};
///
/// let config = PidConfig::pid(1.2, 0.4, 0.05, 20.0, 0.01, -1.0, 1.0)
///     .with_setpoint_weights(0.8, 0.0);
/// let mut pid = PidController::new(config).unwrap();
/// let command = pid.update(1.0, 0.0);
/// assert!(command <= 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidConfig<T> {
    pub(crate) kp: T,
    pub(crate) ki: T,
    pub(crate) kd: T,
    pub(crate) filter: DerivativeFilter<T>,
    pub(crate) b: T, // setpoint weight, proportional path
    pub(crate) c: T, // setpoint weight, derivative path
    pub(crate) kt: T,
    pub(crate) tracking: bool,
    pub(crate) dt: T,
    pub(crate) min: T,
    pub(crate) max: T,
    pub(crate) d0: T,
    pub(crate) i0: T,
}

impl<T: Real> PidConfig<T> {
    /// Proportional-only controller. `dt` is irrelevant and left at zero.
    pub fn proportional(kp: T, min: T, max: T) -> Self {
        Self {
            kp,
            ki: T::zero(),
            kd: T::zero(),
            filter: DerivativeFilter::Bandwidth(T::zero()),
            b: T::one(),
            c: T::one(),
            kt: T::one(),
            tracking: false,
            dt: T::zero(),
            min,
            max,
            d0: T::zero(),
            i0: T::zero(),
        }
    }

    /// Proportional-integral controller with clamping anti-windup.
    pub fn pi(kp: T, ki: T, dt: T, min: T, max: T) -> Self {
        Self {
            ki,
            dt,
            ..Self::proportional(kp, min, max)
        }
    }

    /// PI controller prepared for external tracking with gain `kt`.
    pub fn pi_tracking(kp: T, ki: T, dt: T, min: T, max: T, kt: T) -> Self {
        Self::pi(kp, ki, dt, min, max).with_tracking_gain(kt)
    }

    /// Full PID with a derivative filter of bandwidth `n`.
    pub fn pid(kp: T, ki: T, kd: T, n: T, dt: T, min: T, max: T) -> Self {
        Self {
            kd,
            filter: DerivativeFilter::Bandwidth(n),
            ..Self::pi(kp, ki, dt, min, max)
        }
    }

    /// Weight the reference by `b` in the proportional path and by `c` in
    /// the derivative path.
    pub fn with_setpoint_weights(mut self, b: T, c: T) -> Self {
        self.b = b;
        self.c = c;
        self
    }

    /// Gain applied to `tracking - y` when the controller is driven through
    /// `update_tracking`.
    pub fn with_tracking_gain(mut self, kt: T) -> Self {
        self.kt = kt;
        self.tracking = true;
        self
    }

    /// Values the derivative and integral states start from and return to on
    /// `reset`.
    pub fn with_reset_states(mut self, d0: T, i0: T) -> Self {
        self.d0 = d0;
        self.i0 = i0;
        self
    }

    /// Replace the bandwidth form of the derivative filter with a time
    /// constant `tf`.
    pub fn with_filter_time_constant(mut self, tf: T) -> Self {
        self.filter = DerivativeFilter::TimeConstant(tf);
        self
    }

    pub fn terms(&self) -> Terms {
        Terms {
            has_integral: self.ki != T::zero(),
            has_derivative: self.kd != T::zero(),
            has_setpoint_weighting: self.b != T::one() || self.c != T::one(),
            has_tracking: self.tracking,
        }
    }

    /// Check every construction precondition.
    ///
    /// # Errors
    ///
    /// * [`ControlError::InvalidLimits`] if `min > max` or a bound is NaN
    /// * [`ControlError::NonFiniteParameter`] for NaN or infinite gains,
    ///   weights, timestep or reset values
    /// * [`ControlError::InvalidTimestep`] if `dt < 0`, or `dt == 0` with
    ///   integral, derivative or tracking action configured
    /// * [`ControlError::InvalidFilter`] for a negative filter coefficient or
    ///   a zero bandwidth under a non-zero `kd`
    pub fn validate(&self) -> ControlResult<()> {
        let result = self.check();
        if let Err(err) = &result {
            warn!("rejecting pid configuration: {:?}", err);
        }
        result
    }

    fn check(&self) -> ControlResult<()> {
        check_limits(self.min, self.max)?;

        check_finite(self.kp, "kp")?;
        check_finite(self.ki, "ki")?;
        check_finite(self.kd, "kd")?;
        check_finite(self.b, "b")?;
        check_finite(self.c, "c")?;
        check_finite(self.kt, "kt")?;
        check_finite(self.dt, "dt")?;
        check_finite(self.d0, "d0")?;
        check_finite(self.i0, "i0")?;

        match self.filter {
            DerivativeFilter::Bandwidth(n) => {
                check_finite(n, "n")?;
                if n < T::zero() {
                    return Err(ControlError::InvalidFilter("bandwidth n must not be negative"));
                }
                if n == T::zero() && self.kd != T::zero() {
                    return Err(ControlError::InvalidFilter(
                        "bandwidth n must be positive when kd is non-zero",
                    ));
                }
            }
            DerivativeFilter::TimeConstant(tf) => {
                check_finite(tf, "tf")?;
                if tf < T::zero() {
                    return Err(ControlError::InvalidFilter("time constant tf must not be negative"));
                }
            }
        }

        let terms = self.terms();
        let dynamic = terms.has_integral || terms.has_derivative || terms.has_tracking;
        if self.dt < T::zero() || (dynamic && self.dt == T::zero()) {
            return Err(ControlError::InvalidTimestep { dt: to_f64(self.dt) });
        }

        Ok(())
    }

    // Getter methods
    pub fn kp(&self) -> T {
        self.kp
    }

    pub fn ki(&self) -> T {
        self.ki
    }

    pub fn kd(&self) -> T {
        self.kd
    }

    pub fn filter(&self) -> DerivativeFilter<T> {
        self.filter
    }

    pub fn setpoint_weights(&self) -> (T, T) {
        (self.b, self.c)
    }

    pub fn kt(&self) -> T {
        self.kt
    }

    pub fn dt(&self) -> T {
        self.dt
    }

    pub fn limits(&self) -> (T, T) {
        (self.min, self.max)
    }

    pub fn reset_states(&self) -> (T, T) {
        (self.d0, self.i0)
    }
}
