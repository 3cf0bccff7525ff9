// JSON file repository implementation for fleet insight records
use crate::application::fleet_repository::FleetRepository;
use crate::domain::vehicle::VehicleRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct JsonFleetRepository {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FleetDocument {
    List(Vec<Value>),
    Wrapped { vehicles: Vec<Value> },
}

const ID_KEYS: &[&str] = &["id", "vehicleId", "vehicle_id"];
const NAME_KEYS: &[&str] = &["name", "vehicle", "vehicleName", "vehicle_name"];
const PLATE_KEYS: &[&str] = &["licensePlate", "license_plate", "plate"];
const AVG_SPEED_KEYS: &[&str] = &["avgSpeed", "avg_speed"];
const BATTERY_HEALTH_KEYS: &[&str] = &["batteryHealth", "battery_health"];
const FUEL_EFFICIENCY_KEYS: &[&str] = &["fuelEfficiency", "fuel_efficiency"];
const UTILIZATION_KEYS: &[&str] = &["utilizationRate", "utilization_rate"];

impl JsonFleetRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse(body: &str) -> Result<Vec<VehicleRecord>> {
        let entries = match serde_json::from_str::<FleetDocument>(body)
            .context("Failed to parse fleet document")?
        {
            FleetDocument::List(entries) => entries,
            FleetDocument::Wrapped { vehicles } => vehicles,
        };

        Ok(entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match entry {
                Value::Object(fields) => Some(entry_to_record(fields, index)),
                other => {
                    tracing::warn!(
                        "Skipping fleet entry {}: expected an object, got {}",
                        index + 1,
                        other
                    );
                    None
                }
            })
            .collect())
    }
}

/// Insight records come from loosely typed exports: any field may be
/// missing, mistyped or spelled several ways.
fn entry_to_record(fields: &Map<String, Value>, index: usize) -> VehicleRecord {
    let license_plate = lookup(fields, PLATE_KEYS, value_to_text);
    let id = lookup(fields, ID_KEYS, value_to_text)
        .or_else(|| license_plate.clone())
        .unwrap_or_else(|| format!("vehicle-{}", index + 1));

    VehicleRecord {
        id,
        name: lookup(fields, NAME_KEYS, value_to_text),
        license_plate,
        avg_speed: lookup(fields, AVG_SPEED_KEYS, value_to_number),
        battery_health: lookup(fields, BATTERY_HEALTH_KEYS, value_to_number),
        fuel_efficiency: lookup(fields, FUEL_EFFICIENCY_KEYS, value_to_number),
        utilization_rate: lookup(fields, UTILIZATION_KEYS, value_to_number),
    }
}

/// First key whose value converts.
fn lookup<T>(
    fields: &Map<String, Value>,
    keys: &[&str],
    convert: fn(&Value) -> Option<T>,
) -> Option<T> {
    keys.iter().filter_map(|key| fields.get(*key)).find_map(convert)
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

#[async_trait]
impl FleetRepository for JsonFleetRepository {
    async fn list_vehicles(&self) -> Result<Vec<VehicleRecord>> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read fleet file {}", self.path.display()))?;

        let vehicles = Self::parse(&body)?;
        tracing::debug!("Loaded {} vehicles from {}", vehicles.len(), self.path.display());
        Ok(vehicles)
    }
}
