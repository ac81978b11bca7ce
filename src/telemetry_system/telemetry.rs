use std::io::{self, Write};

use crate::control::lander::{ParachuteStatus, SimulationState};

/// Sampling stride used unless a caller picks one.
pub const DEFAULT_SAMPLE_EVERY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub altitude: f64,
    pub speed: f64,
    pub descent_rate: f64,
    pub throttle: f64,
    pub fuel: f64,
    pub parachute_status: ParachuteStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlightSummary {
    pub duration: f64,
    pub max_altitude: f64,
    pub min_altitude: f64,
    pub max_speed: f64,
    pub final_speed: f64,
    pub final_descent_rate: f64,
    pub parachute_status: ParachuteStatus,
    pub touched_down: bool,
}

pub struct Telemetry {
    pub samples: Vec<Sample>,
    sample_every: usize,
    ticks: usize,
    max_altitude: f64,
    min_altitude: f64,
    max_speed: f64,
    last: Option<Sample>,
    parachute_events: Vec<(ParachuteStatus, f64)>,
    touched_down: bool,
}

impl Default for Telemetry {
    fn default() -> Self {
        Telemetry::new(DEFAULT_SAMPLE_EVERY)
    }
}

impl Telemetry {
    /// Keeps one sample every `sample_every` ticks; extrema see every tick.
    pub fn new(sample_every: usize) -> Self {
        Telemetry {
            samples: Vec::new(),
            sample_every: sample_every.max(1),
            ticks: 0,
            max_altitude: f64::MIN,
            min_altitude: f64::MAX,
            max_speed: 0.0,
            last: None,
            parachute_events: Vec::new(),
            touched_down: false,
        }
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    fn format_altitude(altitude: f64) -> String {
        if altitude.abs() >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    pub fn collect_data(&mut self, state: &SimulationState, planet_radius: f64) {
        let sample = Sample {
            time: state.time,
            altitude: state.altitude(planet_radius),
            speed: state.velocity.magnitude(),
            // Only undefined at the planet centre, which validation rules out.
            descent_rate: state.descent_rate().unwrap_or(0.0),
            throttle: state.throttle(),
            fuel: state.fuel,
            parachute_status: state.parachute_status(),
        };

        self.max_altitude = self.max_altitude.max(sample.altitude);
        self.min_altitude = self.min_altitude.min(sample.altitude);
        self.max_speed = self.max_speed.max(sample.speed);

        let previous_status = self
            .parachute_events
            .last()
            .map_or(ParachuteStatus::NotDeployed, |(status, _)| *status);
        if sample.parachute_status != previous_status {
            self.parachute_events
                .push((sample.parachute_status, sample.time));
        }

        if self.ticks % self.sample_every == 0 {
            self.samples.push(sample);
        }
        self.ticks += 1;
        self.last = Some(sample);
    }

    pub fn mark_touchdown(&mut self) {
        self.touched_down = true;
    }

    pub fn parachute_events(&self) -> &[(ParachuteStatus, f64)] {
        &self.parachute_events
    }

    pub fn summary(&self) -> FlightSummary {
        let last = self.last;
        FlightSummary {
            duration: last.map_or(0.0, |s| s.time),
            max_altitude: if last.is_some() { self.max_altitude } else { 0.0 },
            min_altitude: if last.is_some() { self.min_altitude } else { 0.0 },
            max_speed: self.max_speed,
            final_speed: last.map_or(0.0, |s| s.speed),
            final_descent_rate: last.map_or(0.0, |s| s.descent_rate),
            parachute_status: last.map_or(ParachuteStatus::NotDeployed, |s| s.parachute_status),
            touched_down: self.touched_down,
        }
    }

    pub fn write_csv<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "time,altitude,speed,descent_rate,throttle,fuel,parachute"
        )?;
        for s in &self.samples {
            writeln!(
                writer,
                "{:.3},{:.3},{:.4},{:.4},{:.4},{:.4},{:?}",
                s.time, s.altitude, s.speed, s.descent_rate, s.throttle, s.fuel, s.parachute_status
            )?;
        }
        Ok(())
    }

    pub fn display_data(&self) {
        let summary = self.summary();

        println!("\n--- Flight Summary ---");
        println!("Duration: {}", Self::format_time(summary.duration));
        println!("Max Altitude: {}", Self::format_altitude(summary.max_altitude));
        println!("Min Altitude: {}", Self::format_altitude(summary.min_altitude));
        println!("Max Speed: {:.2} m/s", summary.max_speed);
        println!("Final Speed: {:.2} m/s", summary.final_speed);
        println!("Final Descent Rate: {:.2} m/s", summary.final_descent_rate);
        println!("Touched Down: {}", summary.touched_down);

        println!("\n--- Parachute ---");
        if self.parachute_events.is_empty() {
            println!("Parachute never deployed");
        }
        for (status, time) in &self.parachute_events {
            println!("{:?} at {}", status, Self::format_time(*time));
        }
    }
}
