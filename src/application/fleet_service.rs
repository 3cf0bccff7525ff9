// Fleet service - Use case for listing and selecting vehicles
use crate::application::fleet_repository::FleetRepository;
use crate::domain::vehicle::VehicleRecord;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum FleetError {
    #[error("no vehicles available")]
    NoData,
    #[error("unknown vehicle: {0}")]
    UnknownVehicle(String),
    #[error("fleet source failed: {0:#}")]
    Source(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct FleetService {
    repository: Arc<dyn FleetRepository>,
}

impl FleetService {
    pub fn new(repository: Arc<dyn FleetRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_vehicles(&self) -> anyhow::Result<Vec<VehicleRecord>> {
        self.repository.list_vehicles().await
    }

    /// Resolve the selected vehicle; without an id the first vehicle wins.
    pub async fn select(&self, vehicle_id: Option<&str>) -> Result<VehicleRecord, FleetError> {
        let vehicles = self.repository.list_vehicles().await?;
        if vehicles.is_empty() {
            return Err(FleetError::NoData);
        }

        match vehicle_id {
            None => Ok(vehicles.into_iter().next().ok_or(FleetError::NoData)?),
            Some(id) => vehicles
                .into_iter()
                .find(|v| v.id == id)
                .ok_or_else(|| FleetError::UnknownVehicle(id.to_string())),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;

    /// In-memory fleet used across application tests.
    pub(crate) struct StaticFleet(pub Vec<VehicleRecord>);

    #[async_trait]
    impl FleetRepository for StaticFleet {
        async fn list_vehicles(&self) -> anyhow::Result<Vec<VehicleRecord>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenFleet;

    #[async_trait]
    impl FleetRepository for BrokenFleet {
        async fn list_vehicles(&self) -> anyhow::Result<Vec<VehicleRecord>> {
            anyhow::bail!("disk on fire")
        }
    }

    fn service(records: Vec<VehicleRecord>) -> FleetService {
        FleetService::new(Arc::new(StaticFleet(records)))
    }

    #[tokio::test]
    async fn test_select_defaults_to_first_vehicle() {
        let fleet = service(vec![VehicleRecord::new("a"), VehicleRecord::new("b")]);
        assert_eq!(fleet.select(None).await.unwrap().id, "a");
        assert_eq!(fleet.select(Some("b")).await.unwrap().id, "b");
    }

    #[tokio::test]
    async fn test_select_on_empty_fleet_is_no_data() {
        let fleet = service(Vec::new());
        assert!(matches!(fleet.select(None).await, Err(FleetError::NoData)));
        assert!(matches!(fleet.select(Some("a")).await, Err(FleetError::NoData)));
    }

    #[tokio::test]
    async fn test_select_unknown_vehicle() {
        let fleet = service(vec![VehicleRecord::new("a")]);
        match fleet.select(Some("zz")).await {
            Err(FleetError::UnknownVehicle(id)) => assert_eq!(id, "zz"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_source_failure_is_reported() {
        let fleet = FleetService::new(Arc::new(BrokenFleet));
        let err = fleet.select(None).await.unwrap_err();
        assert!(matches!(err, FleetError::Source(_)));
        assert!(err.to_string().contains("disk on fire"));
    }
}
