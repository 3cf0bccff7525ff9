// Vehicle domain model and baseline profile resolution

/// Raw vehicle insight record as delivered by the fleet layer.
/// Every metric is optional; the profile resolver fills the gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleRecord {
    pub id: String,
    pub name: Option<String>,
    pub license_plate: Option<String>,
    pub avg_speed: Option<f64>,
    pub battery_health: Option<f64>,
    pub fuel_efficiency: Option<f64>,
    pub utilization_rate: Option<f64>,
}

impl VehicleRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Label shown to the renderer: name, then plate, then id.
    pub fn display_name(&self) -> String {
        [self.name.as_deref(), self.license_plate.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(self.id.as_str())
            .to_string()
    }
}

pub const AVG_SPEED_RANGE: (f64, f64) = (15.0, 60.0);
pub const BATTERY_HEALTH_RANGE: (f64, f64) = (70.0, 100.0);
pub const FUEL_EFFICIENCY_RANGE: (f64, f64) = (85.0, 100.0);
pub const UTILIZATION_RANGE: (f64, f64) = (50.0, 100.0);

/// Fallback values used when a record omits a metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileDefaults {
    pub avg_speed: f64,
    pub battery_health: f64,
    pub fuel_efficiency: f64,
    /// Percent, normalized on resolution.
    pub utilization_rate: f64,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            avg_speed: 30.0,
            battery_health: 92.0,
            fuel_efficiency: 92.0,
            utilization_rate: 80.0,
        }
    }
}

/// Clamped baseline parameters describing a vehicle's operating envelope.
///
/// Constructed only through [`VehicleProfile::resolve`], so every field is
/// always inside its domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleProfile {
    avg_speed: f64,
    battery_health: f64,
    fuel_efficiency: f64,
    utilization: f64,
}

impl VehicleProfile {
    /// Resolve each field as `clamp(value ?? default, min, max)`. Never fails.
    pub fn resolve(record: &VehicleRecord, defaults: &ProfileDefaults) -> Self {
        let pick = |value: Option<f64>, default: f64, (min, max): (f64, f64)| {
            value.unwrap_or(default).clamp(min, max)
        };

        Self {
            avg_speed: pick(record.avg_speed, defaults.avg_speed, AVG_SPEED_RANGE),
            battery_health: pick(
                record.battery_health,
                defaults.battery_health,
                BATTERY_HEALTH_RANGE,
            ),
            fuel_efficiency: pick(
                record.fuel_efficiency,
                defaults.fuel_efficiency,
                FUEL_EFFICIENCY_RANGE,
            ),
            utilization: pick(
                record.utilization_rate,
                defaults.utilization_rate,
                UTILIZATION_RANGE,
            ) / 100.0,
        }
    }

    /// km/h
    pub fn avg_speed(&self) -> f64 {
        self.avg_speed
    }

    /// Percent in [70, 100].
    pub fn battery_health(&self) -> f64 {
        self.battery_health
    }

    /// Percent in [85, 100].
    pub fn fuel_efficiency(&self) -> f64 {
        self.fuel_efficiency
    }

    /// Normalized to [0.5, 1].
    pub fn utilization(&self) -> f64 {
        self.utilization
    }

    pub fn health_ratio(&self) -> f64 {
        self.battery_health / 100.0
    }

    pub fn efficiency_ratio(&self) -> f64 {
        self.fuel_efficiency / 100.0
    }
}

impl Default for VehicleProfile {
    fn default() -> Self {
        Self::resolve(&VehicleRecord::default(), &ProfileDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_defaults_for_missing_fields() {
        let profile =
            VehicleProfile::resolve(&VehicleRecord::new("v1"), &ProfileDefaults::default());

        assert_eq!(profile.avg_speed(), 30.0);
        assert_eq!(profile.battery_health(), 92.0);
        assert_eq!(profile.fuel_efficiency(), 92.0);
        assert!((profile.utilization() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_clamps_out_of_range_values() {
        let record = VehicleRecord {
            avg_speed: Some(250.0),
            battery_health: Some(12.0),
            fuel_efficiency: Some(140.0),
            utilization_rate: Some(-5.0),
            ..VehicleRecord::new("v2")
        };
        let profile = VehicleProfile::resolve(&record, &ProfileDefaults::default());

        assert_eq!(profile.avg_speed(), 60.0);
        assert_eq!(profile.battery_health(), 70.0);
        assert_eq!(profile.fuel_efficiency(), 100.0);
        assert_eq!(profile.utilization(), 0.5);
    }

    #[test]
    fn test_resolve_clamps_defaults_too() {
        let defaults = ProfileDefaults {
            avg_speed: 1.0,
            battery_health: 500.0,
            fuel_efficiency: 0.0,
            utilization_rate: 1000.0,
        };
        let profile = VehicleProfile::resolve(&VehicleRecord::new("v3"), &defaults);

        assert_eq!(profile.avg_speed(), 15.0);
        assert_eq!(profile.battery_health(), 100.0);
        assert_eq!(profile.fuel_efficiency(), 85.0);
        assert_eq!(profile.utilization(), 1.0);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut record = VehicleRecord::new("42");
        assert_eq!(record.display_name(), "42");

        record.license_plate = Some("EV-1024".to_string());
        assert_eq!(record.display_name(), "EV-1024");

        record.name = Some("  ".to_string());
        assert_eq!(record.display_name(), "EV-1024");

        record.name = Some("Van 7".to_string());
        assert_eq!(record.display_name(), "Van 7");
    }
}
