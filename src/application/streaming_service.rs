// Streaming telemetry service - One live view per stream consumer
use crate::application::fleet_service::{FleetError, FleetService};
use crate::application::heat_map_service::HeatMapService;
use crate::application::simulation::SimulationSettings;
use crate::application::view::TelemetryView;
use crate::domain::dashboard::{StreamMessage, Theme};
use crate::domain::vehicle::ProfileDefaults;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct StreamingTelemetryService {
    fleet: FleetService,
    heat_maps: HeatMapService,
    settings: SimulationSettings,
    defaults: ProfileDefaults,
    channel_capacity: usize,
}

impl StreamingTelemetryService {
    pub fn new(
        fleet: FleetService,
        heat_maps: HeatMapService,
        settings: SimulationSettings,
        defaults: ProfileDefaults,
        channel_capacity: usize,
    ) -> Self {
        Self {
            fleet,
            heat_maps,
            settings,
            defaults,
            channel_capacity: channel_capacity.max(1),
        }
    }

    /// Open a view for `vehicle_id` (first vehicle when absent). The view
    /// lives until the returned receiver is dropped.
    pub async fn stream_vehicle(
        &self,
        vehicle_id: Option<&str>,
        theme: Theme,
    ) -> mpsc::Receiver<StreamMessage> {
        self.open_view(vehicle_id, theme).await.0
    }

    /// Like [`Self::stream_vehicle`], also returning the supervising task
    /// when a view was actually opened.
    pub async fn open_view(
        &self,
        vehicle_id: Option<&str>,
        theme: Theme,
    ) -> (mpsc::Receiver<StreamMessage>, Option<JoinHandle<()>>) {
        let (tx, rx) = mpsc::channel(self.channel_capacity);

        let vehicle = match self.fleet.select(vehicle_id).await {
            Ok(vehicle) => vehicle,
            Err(FleetError::NoData) => {
                tracing::info!("Fleet is empty, nothing to simulate");
                let _ = tx.send(StreamMessage::NoData).await;
                return (rx, None);
            }
            Err(e) => {
                tracing::warn!("Cannot open telemetry view: {}", e);
                let _ = tx.send(StreamMessage::Error(e.to_string())).await;
                return (rx, None);
            }
        };

        let mut view = TelemetryView::new(
            self.settings,
            self.heat_maps,
            self.defaults,
            theme,
            tx.clone(),
        );

        let handle = tokio::spawn(async move {
            if view.select(&vehicle).await.is_ok() {
                tx.closed().await;
            }
            view.shutdown().await;
        });

        (rx, Some(handle))
    }
}
