// Simulation engine - One owned engine per active view
use crate::domain::cycle::CycleConfig;
use crate::domain::series::SeriesBuffer;
use crate::domain::vehicle::VehicleProfile;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    pub step_seconds: f64,
    pub window: usize,
    pub cycle: CycleConfig,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            step_seconds: 8.0,
            window: 60,
            cycle: CycleConfig::default(),
        }
    }
}

impl SimulationSettings {
    pub fn period(&self) -> Duration {
        Duration::from_secs_f64(self.step_seconds)
    }
}

/// Profile plus the window it drives. Replaced wholesale on every
/// selection; never reconciled with a previous vehicle's series.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    profile: VehicleProfile,
    series: SeriesBuffer,
}

impl SimulationEngine {
    pub fn bootstrap(profile: VehicleProfile, settings: &SimulationSettings, now_ms: i64) -> Self {
        let series = SeriesBuffer::bootstrap(
            settings.window,
            settings.step_seconds,
            &profile,
            settings.cycle,
            0,
            now_ms,
        );
        Self { profile, series }
    }

    pub fn tick(&mut self) -> &SeriesBuffer {
        self.series.advance(&self.profile);
        &self.series
    }

    pub fn profile(&self) -> &VehicleProfile {
        &self.profile
    }

    pub fn series(&self) -> &SeriesBuffer {
        &self.series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cycle::Phase;

    #[test]
    fn test_engine_ticks_through_a_full_cycle() {
        let settings = SimulationSettings::default();
        let mut engine = SimulationEngine::bootstrap(VehicleProfile::default(), &settings, 0);
        assert_eq!(engine.series().last().tick, 59);

        let mut phases = Vec::new();
        for _ in 0..90 {
            phases.push(engine.tick().last().phase);
        }

        assert_eq!(engine.series().len(), 60);
        assert_eq!(engine.series().last().tick, 149);
        assert_eq!(phases.iter().filter(|p| **p == Phase::Idle).count(), 15);
        assert_eq!(phases.iter().filter(|p| **p == Phase::Rest).count(), 15);
    }

    #[test]
    fn test_period_matches_step() {
        let settings = SimulationSettings {
            step_seconds: 0.5,
            ..Default::default()
        };
        assert_eq!(settings.period(), Duration::from_millis(500));
    }
}
