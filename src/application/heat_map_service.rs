// Heat map service - Builds the named heat grids for a vehicle profile
use crate::domain::heat_grid::{DEFAULT_SMOOTHING_PASSES, HeatGrid, gaussian};
use crate::domain::vehicle::VehicleProfile;
use std::f64::consts::PI;

pub const BATTERY_HEAT: &str = "battery_heat";
pub const COOLING_EFFICIENCY: &str = "cooling_efficiency";
pub const POWER_LOAD: &str = "power_load";
pub const USAGE_BEHAVIOR: &str = "usage_behavior";
pub const CHARGING_BEHAVIOR: &str = "charging_behavior";

const TIME_BUCKETS: [&str; 8] = [
    "00:00", "03:00", "06:00", "09:00", "12:00", "15:00", "18:00", "21:00",
];
const CELL_COUNT: usize = 10;
const SPEED_BANDS: [&str; 6] = ["0-20", "20-40", "40-60", "60-80", "80-100", "100+"];
const LOAD_ZONES: [&str; 4] = ["Light", "Moderate", "Heavy", "Peak"];
const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const HOUR_BUCKETS: [&str; 6] = ["00-04", "04-08", "08-12", "12-16", "16-20", "20-24"];
const SOC_BANDS: [&str; 5] = ["0-20%", "20-40%", "40-60%", "60-80%", "80-100%"];

#[derive(Debug, Clone, Copy)]
pub struct HeatMapService {
    passes: usize,
}

impl Default for HeatMapService {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_PASSES)
    }
}

impl HeatMapService {
    pub fn new(passes: usize) -> Self {
        Self { passes }
    }

    /// Build all five grids. Cooling efficiency depends on battery heat, so
    /// the order here is fixed.
    pub fn build_all(&self, profile: &VehicleProfile) -> Vec<HeatGrid> {
        let battery_heat = self.battery_heat(profile);
        let cooling = self.cooling_efficiency(profile, &battery_heat);

        vec![
            battery_heat,
            cooling,
            self.power_load(profile),
            self.usage_behavior(profile),
            self.charging_behavior(profile),
        ]
    }

    /// Time of day x battery cell.
    pub fn battery_heat(&self, profile: &VehicleProfile) -> HeatGrid {
        let boost = heat_boost(profile);
        HeatGrid::build(
            BATTERY_HEAT,
            labels(&TIME_BUCKETS),
            numbered("Cell", CELL_COUNT),
            self.passes,
            |x, y| {
                let (x, y) = (x as f64, y as f64);
                // Afternoon peak, with the centre of the pack running warmest.
                38.0 + 30.0 * gaussian(x, 5.0, 1.6)
                    + 14.0 * gaussian(y, (CELL_COUNT as f64 - 1.0) / 2.0, 2.5)
                    + 6.0 * (y * 0.9 + x * 0.4).sin()
                    + boost
            },
        )
    }

    /// Same axes as battery heat; reads the heat of the following time bucket
    /// since cooling lags the load it responds to.
    pub fn cooling_efficiency(
        &self,
        profile: &VehicleProfile,
        battery_heat: &HeatGrid,
    ) -> HeatGrid {
        let efficiency_bias = 20.0 * (profile.efficiency_ratio() - 0.85);
        let last_column = battery_heat.columns().saturating_sub(1);
        HeatGrid::build(
            COOLING_EFFICIENCY,
            battery_heat.column_labels.clone(),
            battery_heat.row_labels.clone(),
            self.passes,
            |x, y| {
                let heat = battery_heat.get(y, (x + 1).min(last_column)).unwrap_or(50.0);
                96.0 - 0.55 * heat + efficiency_bias + 4.0 * (x as f64 * 0.7).cos()
            },
        )
    }

    /// Speed band x load zone.
    pub fn power_load(&self, profile: &VehicleProfile) -> HeatGrid {
        let usual_band = profile.avg_speed() / 20.0;
        let boost = heat_boost(profile);
        HeatGrid::build(
            POWER_LOAD,
            labels(&SPEED_BANDS),
            labels(&LOAD_ZONES),
            self.passes,
            |x, y| {
                let (x, y) = (x as f64, y as f64);
                12.0 + 9.0 * x + 14.0 * y
                    + 25.0 * gaussian(x, usual_band, 1.2) * profile.utilization()
                    + boost
            },
        )
    }

    /// Weekday x hour bucket.
    pub fn usage_behavior(&self, profile: &VehicleProfile) -> HeatGrid {
        let u = profile.utilization();
        HeatGrid::build(
            USAGE_BEHAVIOR,
            labels(&WEEKDAYS),
            labels(&HOUR_BUCKETS),
            self.passes,
            |x, y| {
                let weekday = if x < 5 { 1.0 } else { 0.55 };
                let (yf, xf) = (y as f64, x as f64);
                let commute = gaussian(yf, 2.0, 0.9) + 0.8 * gaussian(yf, 4.0, 0.9);
                10.0 + 70.0 * u * weekday * commute + 5.0 * (xf * 2.0 * PI / 7.0).sin()
            },
        )
    }

    /// Hour bucket x state-of-charge band.
    pub fn charging_behavior(&self, profile: &VehicleProfile) -> HeatGrid {
        let wear = 1.0 - profile.health_ratio();
        HeatGrid::build(
            CHARGING_BEHAVIOR,
            labels(&TIME_BUCKETS),
            labels(&SOC_BANDS),
            self.passes,
            |x, y| {
                let (x, y) = (x as f64, y as f64);
                // Overnight sessions starting from low charge dominate.
                let overnight = gaussian(x, 0.5, 1.3) + gaussian(x, 7.5, 1.0);
                let low_charge = gaussian(y, 1.0, 1.1);
                8.0 + 65.0 * overnight * low_charge
                    + 18.0 * gaussian(x, 4.0, 0.8) * profile.utilization()
                    + 40.0 * wear
            },
        )
    }
}

/// Shared bias: busier vehicles and worn batteries run hotter.
pub fn heat_boost(profile: &VehicleProfile) -> f64 {
    12.0 * (profile.utilization() - 0.6) + 10.0 * (1.0 - profile.health_ratio())
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn numbered(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{prefix} {i}")).collect()
}
