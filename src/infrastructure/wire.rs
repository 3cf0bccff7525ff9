// Mapper to convert domain models to JSON wire types
use crate::domain::dashboard::{Dashboard, HeatMapSet, StreamMessage};
use crate::domain::heat_grid::HeatGrid;
use crate::domain::series::SeriesBuffer;
use crate::domain::telemetry::{Channel, TelemetrySample};
use crate::domain::vehicle::{VehicleProfile, VehicleRecord};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireMessage {
    Skeleton(SkeletonFrame),
    SeriesUpdate(SeriesFrame),
    NoData,
    Error { message: String },
}

#[derive(Debug, Serialize)]
pub struct SkeletonFrame {
    pub title: String,
    pub vehicle: WireVehicle,
    pub theme: &'static str,
    pub profile: WireProfile,
    pub channels: Vec<WireChannel>,
    pub heat_grids: Vec<WireHeatGrid>,
    pub series: Vec<WireSample>,
}

#[derive(Debug, Serialize)]
pub struct SeriesFrame {
    pub vehicle_id: String,
    pub series: Vec<WireSample>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WireVehicle {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WireProfile {
    pub avg_speed: f64,
    pub battery_health: f64,
    pub fuel_efficiency: f64,
    /// Percent, like the fleet record field of the same name.
    pub utilization_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct WireChannel {
    pub id: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub points: Vec<WirePoint>,
}

#[derive(Debug, Serialize)]
pub struct WirePoint {
    pub ts: i64,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct WireHeatGrid {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<String>,
    pub cells: Vec<Vec<f64>>,
}

#[derive(Debug, Serialize)]
pub struct WireHeatMapSet {
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub grids: Vec<WireHeatGrid>,
}

#[derive(Debug, Serialize)]
pub struct WireSample {
    pub ts: i64,
    pub tick: u64,
    pub phase: &'static str,
    pub speed: f64,
    pub acceleration: f64,
    pub torque: f64,
    pub power: f64,
    pub battery_temp: f64,
    pub motor_temp: f64,
    pub controller_temp: f64,
    pub rpm: f64,
    pub motor_voltage: f64,
    pub battery_performance: f64,
    pub range_left: f64,
    pub idle_time: f64,
}

pub fn message_to_wire(message: StreamMessage) -> WireMessage {
    match message {
        StreamMessage::Skeleton(dashboard) => {
            WireMessage::Skeleton(skeleton_to_wire(*dashboard))
        }
        StreamMessage::SeriesUpdate { vehicle_id, series } => {
            WireMessage::SeriesUpdate(SeriesFrame {
                vehicle_id,
                series: series_to_wire(&series),
            })
        }
        StreamMessage::NoData => WireMessage::NoData,
        StreamMessage::Error(message) => WireMessage::Error { message },
    }
}

pub fn vehicle_to_wire(vehicle: &VehicleRecord) -> WireVehicle {
    WireVehicle {
        id: vehicle.id.clone(),
        name: vehicle.display_name(),
        license_plate: vehicle.license_plate.clone(),
    }
}

pub fn heat_map_set_to_wire(set: HeatMapSet) -> WireHeatMapSet {
    WireHeatMapSet {
        vehicle_id: set.vehicle_id,
        vehicle_name: set.vehicle_name,
        grids: set.grids.into_iter().map(grid_to_wire).collect(),
    }
}

fn skeleton_to_wire(dashboard: Dashboard) -> SkeletonFrame {
    SkeletonFrame {
        title: dashboard.title,
        vehicle: WireVehicle {
            id: dashboard.vehicle_id,
            name: dashboard.vehicle_name,
            license_plate: dashboard.license_plate,
        },
        theme: dashboard.theme.as_str(),
        profile: profile_to_wire(&dashboard.profile),
        channels: Channel::ALL
            .iter()
            .map(|&c| channel_to_wire(c, &dashboard.series))
            .collect(),
        heat_grids: dashboard.heat_grids.into_iter().map(grid_to_wire).collect(),
        series: series_to_wire(&dashboard.series),
    }
}

fn profile_to_wire(profile: &VehicleProfile) -> WireProfile {
    WireProfile {
        avg_speed: profile.avg_speed(),
        battery_health: profile.battery_health(),
        fuel_efficiency: profile.fuel_efficiency(),
        utilization_rate: profile.utilization() * 100.0,
    }
}

fn channel_to_wire(channel: Channel, series: &SeriesBuffer) -> WireChannel {
    let (min, max) = channel.domain();
    WireChannel {
        id: channel.id(),
        unit: channel.unit(),
        min,
        max,
        points: series
            .channel_points(channel)
            .into_iter()
            .map(|p| WirePoint {
                ts: p.time_ms,
                value: p.value,
            })
            .collect(),
    }
}

fn grid_to_wire(grid: HeatGrid) -> WireHeatGrid {
    WireHeatGrid {
        name: grid.name,
        columns: grid.column_labels,
        rows: grid.row_labels,
        cells: grid.cells,
    }
}

fn series_to_wire(series: &SeriesBuffer) -> Vec<WireSample> {
    series.samples().map(sample_to_wire).collect()
}

fn sample_to_wire(sample: &TelemetrySample) -> WireSample {
    WireSample {
        ts: sample.ts,
        tick: sample.tick,
        phase: sample.phase.as_str(),
        speed: sample.speed,
        acceleration: sample.acceleration,
        torque: sample.torque,
        power: sample.power,
        battery_temp: sample.battery_temp,
        motor_temp: sample.motor_temp,
        controller_temp: sample.controller_temp,
        rpm: sample.rpm,
        motor_voltage: sample.motor_voltage,
        battery_performance: sample.battery_performance,
        range_left: sample.range_left,
        idle_time: sample.idle_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::heat_map_service::HeatMapService;
    use crate::domain::cycle::CycleConfig;
    use crate::domain::dashboard::Theme;
    use serde_json::json;

    fn dashboard() -> Dashboard {
        let profile = VehicleProfile::default();
        Dashboard {
            title: "Van Telemetry".to_string(),
            vehicle_id: "v1".to_string(),
            vehicle_name: "Van".to_string(),
            license_plate: None,
            theme: Theme::Light,
            profile,
            heat_grids: HeatMapService::default().build_all(&profile),
            series: SeriesBuffer::bootstrap(3, 8.0, &profile, CycleConfig::default(), 0, 24_000),
        }
    }

    #[test]
    fn test_skeleton_shape() {
        let wire = message_to_wire(StreamMessage::Skeleton(Box::new(dashboard())));
        let value = serde_json::to_value(&wire).unwrap();

        assert_eq!(value["type"], "skeleton");
        assert_eq!(value["theme"], "light");
        assert_eq!(value["vehicle"], json!({"id": "v1", "name": "Van"}));
        assert_eq!(value["channels"].as_array().unwrap().len(), Channel::ALL.len());
        assert_eq!(value["heat_grids"][0]["name"], "battery_heat");
        assert_eq!(value["series"].as_array().unwrap().len(), 3);
        assert_eq!(value["series"][2]["ts"], 24_000);
        assert_eq!(value["series"][0]["phase"], "driving");
        let utilization = value["profile"]["utilization_rate"].as_f64().unwrap();
        assert!((utilization - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_skeleton_vehicle_matches_fleet_summary() {
        let record = VehicleRecord {
            name: Some("Van".to_string()),
            license_plate: Some("EV-1".to_string()),
            ..VehicleRecord::new("v1")
        };
        let skeleton = Dashboard {
            license_plate: record.license_plate.clone(),
            ..dashboard()
        };

        let wire = message_to_wire(StreamMessage::Skeleton(Box::new(skeleton)));
        let value = serde_json::to_value(&wire).unwrap();
        let summary = serde_json::to_value(vehicle_to_wire(&record)).unwrap();

        assert_eq!(value["vehicle"], summary);
        assert_eq!(summary["license_plate"], "EV-1");
    }

    #[test]
    fn test_channel_descriptors_carry_chart_points() {
        let dashboard = dashboard();
        let speeds: Vec<f64> = dashboard.series.samples().map(|s| s.speed).collect();

        let wire = message_to_wire(StreamMessage::Skeleton(Box::new(dashboard)));
        let value = serde_json::to_value(&wire).unwrap();
        let speed = &value["channels"][0];

        assert_eq!(speed["id"], Channel::Speed.id());
        let points = speed["points"].as_array().unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2]["ts"], 24_000);
        assert_eq!(points[0]["value"], speeds[0]);
    }

    #[test]
    fn test_terminal_messages() {
        let no_data = serde_json::to_value(message_to_wire(StreamMessage::NoData)).unwrap();
        assert_eq!(no_data, json!({"type": "no_data"}));

        let error = message_to_wire(StreamMessage::Error("boom".to_string()));
        let error = serde_json::to_value(error).unwrap();
        assert_eq!(error, json!({"type": "error", "message": "boom"}));
    }

    #[test]
    fn test_vehicle_summary_uses_display_name() {
        let record = VehicleRecord {
            license_plate: Some("EV-1".to_string()),
            ..VehicleRecord::new("1")
        };
        let wire = vehicle_to_wire(&record);
        assert_eq!(wire.name, "EV-1");
        assert_eq!(wire.license_plate.as_deref(), Some("EV-1"));
    }
}
