// Repository trait for fleet insight data
use crate::domain::vehicle::VehicleRecord;
use async_trait::async_trait;

#[async_trait]
pub trait FleetRepository: Send + Sync {
    /// List every vehicle insight record, in fleet order
    async fn list_vehicles(&self) -> anyhow::Result<Vec<VehicleRecord>>;
}
