// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::fleet_service::FleetService;
use crate::application::streaming_service::StreamingTelemetryService;

#[derive(Clone)]
pub struct AppState {
    pub fleet_service: FleetService,
    pub dashboard_service: DashboardService,
    pub streaming_service: StreamingTelemetryService,
}
