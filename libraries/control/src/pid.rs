// PID controller with filtered derivative, clamping anti-windup and tracking
use log::{debug, trace};

use crate::config::{DerivativeFilter, PidConfig};
use crate::error::ControlResult;
use crate::{clamp, Real};

/// Snapshot of the controller's run state after the latest tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidDiagnostics<T> {
    pub output: T,
    pub proportional: T,
    pub derivative: T,
    pub integral_state: T,
    pub derivative_state: T,
    pub integrating: bool,
}

/// Discrete PID compensator.
///
/// Each call to [`update`](Self::update) computes
///
/// ```text
/// yp = kp * (b*r - y)
/// yd = (kd * (c*r - y) - dstate) * n
/// u  = clamp(yp + istate + yd, min, max)
/// ```
///
/// then advances the derivative filter state unconditionally and the
/// integrator only when the anti-windup gate allows it.
///
/// The controller is meant to be owned by a single control loop; it holds no
/// locks and never allocates.
#[derive(Debug, Clone)]
pub struct PidController<T> {
    config: PidConfig<T>,

    yp: T,
    yd: T,
    dstate: T,
    istate: T,
    y: T,
    integrating: bool,
}

impl<T: Real> PidController<T> {
    /// Create a controller from a validated configuration.
    ///
    /// The derivative and integral states start at the configured reset
    /// defaults.
    pub fn new(config: PidConfig<T>) -> ControlResult<Self> {
        config.validate()?;
        debug!(
            "pid controller configured: {:?}, limits [{:?}, {:?}]",
            config.terms(),
            config.min,
            config.max
        );

        Ok(Self {
            config,
            yp: T::zero(),
            yd: T::zero(),
            dstate: config.d0,
            istate: config.i0,
            y: clamp(T::zero(), config.min, config.max),
            integrating: true,
        })
    }

    /// Run one tick with internal (clamping) anti-windup.
    pub fn update(&mut self, reference: T, feedback: T) -> T {
        let error = self.advance(reference, feedback);
        if self.integrating {
            self.istate = self.istate + self.config.dt * self.config.ki * error;
        }
        self.y
    }

    /// Run one tick while pulling the integrator toward `tracking`.
    ///
    /// The integrator accumulates `ki*e + kt*(tracking - u)`, where `u` is
    /// this tick's saturated command, so a standby controller settles on the
    /// state that reproduces the active command and can take over without a
    /// jump.
    ///
    /// The saturation gate is the same one [`update`](Self::update) uses.
    /// Earlier revisions of this law documented an inverted polarity for the
    /// max-saturation case of the tracking form; that variant is not
    /// reproduced here and should be checked against a reference simulation
    /// before a loop relies on it.
    pub fn update_tracking(&mut self, reference: T, feedback: T, tracking: T) -> T {
        let error = self.advance(reference, feedback);
        if self.integrating {
            let drive = self.config.ki * error + self.config.kt * (tracking - self.y);
            self.istate = self.istate + self.config.dt * drive;
        }
        self.y
    }

    /// Restore the derivative and integral states to their reset defaults.
    ///
    /// Tuning constants and the last output are left untouched.
    pub fn reset(&mut self) {
        self.dstate = self.config.d0;
        self.istate = self.config.i0;
        trace!("pid controller reset");
    }

    // Shared part of both update forms: computes the terms, saturates the
    // output, decides the gate and advances the derivative state. Returns the
    // raw error for the integrator.
    fn advance(&mut self, reference: T, feedback: T) -> T {
        let cfg = &self.config;
        let error = reference - feedback;

        self.yp = cfg.kp * (cfg.b * reference - feedback);

        let input = cfg.kd * (cfg.c * reference - feedback);
        // None when the filter denominator vanishes
        let derivative = match cfg.filter {
            DerivativeFilter::Bandwidth(n) => Some((input - self.dstate) * n),
            DerivativeFilter::TimeConstant(tf) => {
                let denominator = tf + cfg.dt;
                if denominator == T::zero() {
                    None
                } else {
                    Some((input - self.dstate) / denominator)
                }
            }
        };
        self.yd = derivative.unwrap_or_else(T::zero);

        let raw = self.yp + self.istate + self.yd;
        let drive = cfg.ki * error;

        let (y, integrating) = if raw >= cfg.max {
            (cfg.max, drive <= T::zero())
        } else if raw <= cfg.min {
            (cfg.min, drive >= T::zero())
        } else {
            (raw, true)
        };
        self.y = y;
        self.integrating = integrating;

        self.dstate = match derivative {
            Some(yd) => self.dstate + cfg.dt * yd,
            None => T::zero(),
        };

        error
    }

    // Getter methods
    pub fn config(&self) -> &PidConfig<T> {
        &self.config
    }

    /// Last command returned, always within the output limits.
    pub fn output(&self) -> T {
        self.y
    }

    pub fn proportional_term(&self) -> T {
        self.yp
    }

    pub fn derivative_term(&self) -> T {
        self.yd
    }

    pub fn integral_state(&self) -> T {
        self.istate
    }

    pub fn derivative_state(&self) -> T {
        self.dstate
    }

    /// Whether the last tick let the integrator accumulate.
    pub fn is_integrating(&self) -> bool {
        self.integrating
    }

    pub fn diagnostics(&self) -> PidDiagnostics<T> {
        PidDiagnostics {
            output: self.y,
            proportional: self.yp,
            derivative: self.yd,
            integral_state: self.istate,
            derivative_state: self.dstate,
            integrating: self.integrating,
        }
    }
}
