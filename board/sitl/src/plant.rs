/// First-order lag with an actuator range, `tau * x' = -x + gain * sat(u)`.
///
/// Stands in for a single flight axis; integrated with forward Euler at the
/// loop rate.
#[derive(Debug, Clone)]
pub struct Plant {
    state: f64,
    gain: f64,
    tau: f64,
    actuator: (f64, f64),
}

impl Plant {
    pub fn new(gain: f64, tau: f64, actuator: (f64, f64)) -> Self {
        Self {
            state: 0.0,
            gain,
            tau,
            actuator,
        }
    }

    pub fn step(&mut self, command: f64, dt: f64) -> f64 {
        let (low, high) = self.actuator;
        let applied = command.clamp(low, high);
        self.state += dt * (self.gain * applied - self.state) / self.tau;
        self.state
    }

    pub fn output(&self) -> f64 {
        self.state
    }
}
