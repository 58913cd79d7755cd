use log::debug;

use crate::error::{check_finite, check_limits, ControlResult};
use crate::{clamp, Real};

/// Linear gain followed by output saturation.
///
/// Useful as a limiter or as a scale stage in a unity-feedback loop. The only
/// state is the last output, kept for inspection.
#[derive(Debug, Clone)]
pub struct GainBlock<T> {
    k: T,
    min: T,
    max: T,
    y: T,
}

impl<T: Real> GainBlock<T> {
    /// Create a gain block with gain `k` and output limits `[min, max]`.
    pub fn new(k: T, min: T, max: T) -> ControlResult<Self> {
        check_limits(min, max)?;
        check_finite(k, "k")?;
        debug!("gain block configured: k {:?}, limits [{:?}, {:?}]", k, min, max);

        Ok(Self {
            k,
            min,
            max,
            y: clamp(T::zero(), min, max),
        })
    }

    /// Scale `input` by the gain and saturate.
    pub fn run(&mut self, input: T) -> T {
        self.y = clamp(self.k * input, self.min, self.max);
        self.y
    }

    pub fn output(&self) -> T {
        self.y
    }

    pub fn gain(&self) -> T {
        self.k
    }

    pub fn limits(&self) -> (T, T) {
        (self.min, self.max)
    }
}
