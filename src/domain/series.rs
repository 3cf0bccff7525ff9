// Sliding telemetry window
use std::collections::VecDeque;

use super::cycle::CycleConfig;
use super::step::{seed, step, step_millis};
use super::telemetry::{Channel, TelemetrySample, TimeSeriesPoint};
use super::vehicle::VehicleProfile;

/// Fixed-length FIFO of the most recent samples, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBuffer {
    samples: VecDeque<TelemetrySample>,
    capacity: usize,
    step_seconds: f64,
    cycle: CycleConfig,
}

impl SeriesBuffer {
    /// Build a full window ending at `now_ms` by advancing `n` times from a
    /// seed placed one step before the first sample.
    ///
    /// A zero `n` is treated as 1.
    pub fn bootstrap(
        n: usize,
        step_seconds: f64,
        profile: &VehicleProfile,
        cycle: CycleConfig,
        start_tick: u64,
        now_ms: i64,
    ) -> Self {
        let capacity = n.max(1);
        let seed_ts = now_ms - step_millis(step_seconds) * capacity as i64;
        let mut current = seed(profile, start_tick, seed_ts);

        let mut samples = VecDeque::with_capacity(capacity);
        for tick in start_tick..start_tick + capacity as u64 {
            current = step(&current, profile, cycle.phase(tick), step_seconds, tick);
            samples.push_back(current);
        }

        tracing::debug!(
            "Bootstrapped {} samples (ticks {}..{})",
            capacity,
            start_tick,
            start_tick + capacity as u64
        );

        Self {
            samples,
            capacity,
            step_seconds,
            cycle,
        }
    }

    /// Append the next sample and evict the oldest one.
    pub fn advance(&mut self, profile: &VehicleProfile) -> &TelemetrySample {
        let last = *self.last();
        let tick = last.tick + 1;
        let next = step(&last, profile, self.cycle.phase(tick), self.step_seconds, tick);

        self.samples.pop_front();
        self.samples.push_back(next);
        self.last()
    }

    pub fn last(&self) -> &TelemetrySample {
        // Never empty: bootstrap fills `capacity >= 1` samples and advance
        // pops exactly one before pushing one.
        &self.samples[self.samples.len() - 1]
    }

    pub fn first(&self) -> &TelemetrySample {
        &self.samples[0]
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn step_seconds(&self) -> f64 {
        self.step_seconds
    }

    /// Tick the next advance will be computed at.
    pub fn next_tick(&self) -> u64 {
        self.last().tick + 1
    }

    pub fn samples(&self) -> impl ExactSizeIterator<Item = &TelemetrySample> {
        self.samples.iter()
    }

    /// `(ts, value)` pairs of a single channel, oldest first.
    pub fn channel_points(&self, channel: Channel) -> Vec<TimeSeriesPoint> {
        self.samples
            .iter()
            .map(|s| TimeSeriesPoint::new(s.ts, s.value(channel)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::{ProfileDefaults, VehicleRecord};

    const NOW: i64 = 1_700_000_000_000;

    fn scenario_profile() -> VehicleProfile {
        let record = VehicleRecord {
            avg_speed: Some(30.0),
            battery_health: Some(92.0),
            fuel_efficiency: Some(92.0),
            utilization_rate: Some(80.0),
            ..VehicleRecord::new("scenario")
        };
        VehicleProfile::resolve(&record, &ProfileDefaults::default())
    }

    fn assert_window_invariants(buffer: &SeriesBuffer, n: usize, step_ms: i64) {
        assert_eq!(buffer.len(), n);
        let samples: Vec<&TelemetrySample> = buffer.samples().collect();
        for pair in samples.windows(2) {
            assert_eq!(pair[1].ts - pair[0].ts, step_ms);
            assert_eq!(pair[1].tick, pair[0].tick + 1);
        }
        assert!(samples.iter().all(|s| s.within_domains()));
    }

    #[test]
    fn test_bootstrap_scenario() {
        let profile = scenario_profile();
        let buffer = SeriesBuffer::bootstrap(60, 8.0, &profile, CycleConfig::default(), 0, NOW);

        assert_window_invariants(&buffer, 60, 8_000);
        assert_eq!(buffer.last().ts, NOW);
        assert_eq!(buffer.first().ts, NOW - 59 * 8_000);
        assert_eq!(buffer.first().tick, 0);

        // One low-pass step away from 0.6 * 30.
        let first_speed = buffer.first().speed;
        assert!((first_speed - 18.0).abs() < 3.0, "first speed {first_speed}");
        assert!(buffer.samples().all(|s| (20.0..=65.0).contains(&s.battery_temp)));
    }

    #[test]
    fn test_bootstrap_is_deterministic() {
        let profile = scenario_profile();
        let a = SeriesBuffer::bootstrap(60, 8.0, &profile, CycleConfig::default(), 17, NOW);
        let b = SeriesBuffer::bootstrap(60, 8.0, &profile, CycleConfig::default(), 17, NOW);

        assert_eq!(a, b);
    }

    #[test]
    fn test_advance_keeps_length_and_spacing() {
        let profile = scenario_profile();
        for n in [1, 2, 5, 60] {
            let mut buffer =
                SeriesBuffer::bootstrap(n, 8.0, &profile, CycleConfig::default(), 0, NOW);
            for _ in 0..200 {
                let before = buffer.last().ts;
                buffer.advance(&profile);
                assert_eq!(buffer.last().ts, before + 8_000);
                assert_window_invariants(&buffer, n, 8_000);
            }
        }
    }

    #[test]
    fn test_zero_capacity_becomes_one() {
        let buffer = SeriesBuffer::bootstrap(
            0,
            8.0,
            &VehicleProfile::default(),
            CycleConfig::default(),
            0,
            NOW,
        );
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.last().ts, NOW);
    }

    #[test]
    fn test_advance_continues_bootstrap_exactly() {
        let profile = scenario_profile();
        let long =
            SeriesBuffer::bootstrap(61, 8.0, &profile, CycleConfig::default(), 0, NOW + 8_000);
        let mut short = SeriesBuffer::bootstrap(60, 8.0, &profile, CycleConfig::default(), 0, NOW);
        short.advance(&profile);

        // Advancing is the same step the bootstrap uses.
        assert_eq!(short.last(), long.last());
        assert_eq!(short.next_tick(), 61);
    }

    #[test]
    fn test_idle_torque_is_bounded_by_driving_peak() {
        let profile = scenario_profile();
        let buffer = SeriesBuffer::bootstrap(90, 8.0, &profile, CycleConfig::default(), 0, NOW);
        let samples: Vec<&TelemetrySample> = buffer.samples().collect();

        let peak = samples[..60]
            .iter()
            .map(|s| s.torque)
            .fold(f64::MIN, f64::max);
        for sample in &samples[60..75] {
            assert!(
                sample.torque <= 0.12 * peak + 1e-9,
                "tick {} torque {} exceeds 12% of {}",
                sample.tick,
                sample.torque,
                peak
            );
        }
    }

    #[test]
    fn test_channel_points_follow_samples() {
        let profile = scenario_profile();
        let buffer = SeriesBuffer::bootstrap(10, 2.0, &profile, CycleConfig::default(), 0, NOW);
        let points = buffer.channel_points(Channel::Speed);

        assert_eq!(points.len(), 10);
        assert_eq!(points[9].time_ms, NOW);
        assert_eq!(points[0].value, buffer.first().speed);
    }
}
