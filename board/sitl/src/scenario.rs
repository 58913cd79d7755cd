use anyhow::{ensure, Context, Result};
use clap::ValueEnum;
use control::{Gain32, Pid32, Pid64, PidConfig};
use log::{debug, info};

use crate::plant::Plant;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Scenario {
    /// Documented proportional controller and gain block outputs
    Example,
    /// Step response of a filtered, setpoint-weighted PID
    Step,
    /// Hand-off between two controllers with tracking anti-windup
    Handoff,
}

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub dt: f64,
    pub duration: f64,
    pub reference: f64,
}

impl Settings {
    fn steps(&self) -> usize {
        (self.duration / self.dt).ceil() as usize
    }
}

pub fn run(scenario: Scenario, settings: Settings) -> Result<()> {
    match scenario {
        Scenario::Example => example(),
        Scenario::Step => step(settings),
        Scenario::Handoff => handoff(settings),
    }
}

fn example() -> Result<()> {
    // Proportional controller with a gain of 2 and limits of +/- 1
    let mut pid = Pid32::new(PidConfig::proportional(2.0, -1.0, 1.0))
        .context("proportional controller")?;
    info!("pid.update(3, 1) = {} (saturated)", pid.update(3.0, 1.0));

    // Gain of 2 with limits at -1 and 10
    let mut gain = Gain32::new(2.0, -1.0, 10.0).context("gain block")?;
    info!("gain.run(3) = {}", gain.run(3.0));
    info!("gain.run(6) = {} (saturated)", gain.run(6.0));
    info!("gain.run(-1) = {} (saturated)", gain.run(-1.0));
    Ok(())
}

fn step(settings: Settings) -> Result<()> {
    let Settings { dt, reference, .. } = settings;
    let config = PidConfig::pid(1.5, 3.0, 0.1, 50.0, dt, -1.0, 1.0).with_setpoint_weights(0.7, 0.0);
    let mut pid = Pid64::new(config).context("step controller")?;
    let mut plant = Plant::new(2.0, 0.3, (-1.0, 1.0));

    let mut peak = f64::NEG_INFINITY;
    let mut saturated_ticks = 0usize;
    for tick in 0..settings.steps() {
        let command = pid.update(reference, plant.output());
        let y = plant.step(command, dt);
        peak = peak.max(y);
        if !pid.is_integrating() {
            saturated_ticks += 1;
        }
        debug!(
            "t={:.3} u={:.4} y={:.4} istate={:.4}",
            tick as f64 * dt,
            command,
            y,
            pid.integral_state()
        );
    }

    let y = plant.output();
    info!(
        "step to {}: final {:.4}, peak {:.4}, integrator held for {} ticks",
        reference, y, peak, saturated_ticks
    );
    ensure!(y.is_finite(), "plant diverged");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Primary,
    Secondary,
}

fn handoff(settings: Settings) -> Result<()> {
    let Settings { dt, reference, .. } = settings;
    let mut primary = Pid64::new(PidConfig::pi_tracking(2.0, 1.0, dt, -5.0, 5.0, 10.0))
        .context("primary controller")?;
    let mut secondary = Pid64::new(PidConfig::pi_tracking(0.8, 3.0, dt, -5.0, 5.0, 10.0))
        .context("secondary controller")?;
    let mut plant = Plant::new(1.0, 0.4, (-5.0, 5.0));

    let steps = settings.steps();
    let switch_at = steps / 2;
    let mut mode = Mode::Primary;
    let mut last_command = 0.0;
    let mut jump = 0.0;

    for tick in 0..steps {
        if tick == switch_at {
            mode = Mode::Secondary;
            info!("switching to {:?} at t={:.3}", mode, tick as f64 * dt);
        }

        let y = plant.output();
        // The standby controller tracks the active command
        let command = match mode {
            Mode::Primary => {
                let command = primary.update(reference, y);
                secondary.update_tracking(reference, y, command);
                command
            }
            Mode::Secondary => {
                let command = secondary.update(reference, y);
                primary.update_tracking(reference, y, command);
                command
            }
        };

        if tick == switch_at {
            jump = command - last_command;
        }
        last_command = command;
        plant.step(command, dt);
    }

    info!(
        "hand-off command jump {:.5}, final output {:.4}",
        jump,
        plant.output()
    );
    Ok(())
}
