// Dashboard service - One-shot heat map set for a vehicle
use crate::application::fleet_service::{FleetError, FleetService};
use crate::application::heat_map_service::HeatMapService;
use crate::domain::dashboard::HeatMapSet;
use crate::domain::vehicle::{ProfileDefaults, VehicleProfile};

#[derive(Clone)]
pub struct DashboardService {
    fleet: FleetService,
    heat_maps: HeatMapService,
    defaults: ProfileDefaults,
}

impl DashboardService {
    pub fn new(fleet: FleetService, heat_maps: HeatMapService, defaults: ProfileDefaults) -> Self {
        Self {
            fleet,
            heat_maps,
            defaults,
        }
    }

    pub async fn get_heat_maps(&self, vehicle_id: &str) -> Result<HeatMapSet, FleetError> {
        let vehicle = self.fleet.select(Some(vehicle_id)).await?;
        let profile = VehicleProfile::resolve(&vehicle, &self.defaults);

        Ok(HeatMapSet {
            vehicle_name: vehicle.display_name(),
            vehicle_id: vehicle.id,
            grids: self.heat_maps.build_all(&profile),
        })
    }
}
