// Telemetry view - Per-consumer engine, heat grids and scheduler
use crate::application::heat_map_service::HeatMapService;
use crate::application::scheduler::Scheduler;
use crate::application::simulation::{SimulationEngine, SimulationSettings};
use crate::domain::dashboard::{Dashboard, StreamMessage, Theme};
use crate::domain::vehicle::{ProfileDefaults, VehicleProfile, VehicleRecord};
use std::ops::ControlFlow;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

#[derive(Debug, thiserror::Error)]
#[error("telemetry view consumer disconnected")]
pub struct ViewClosed;

/// One visible dashboard. Owns its window and timer; nothing is shared with
/// other views.
pub struct TelemetryView {
    settings: SimulationSettings,
    heat_maps: HeatMapService,
    defaults: ProfileDefaults,
    theme: Theme,
    tx: mpsc::Sender<StreamMessage>,
    scheduler: Scheduler,
    selected: Option<String>,
}

impl TelemetryView {
    pub fn new(
        settings: SimulationSettings,
        heat_maps: HeatMapService,
        defaults: ProfileDefaults,
        theme: Theme,
        tx: mpsc::Sender<StreamMessage>,
    ) -> Self {
        Self {
            scheduler: Scheduler::new(settings.period()),
            settings,
            heat_maps,
            defaults,
            theme,
            tx,
            selected: None,
        }
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_running()
    }

    pub async fn select(&mut self, vehicle: &VehicleRecord) -> Result<(), ViewClosed> {
        self.select_at(vehicle, chrono::Utc::now().timestamp_millis())
            .await
    }

    /// Discard the current window and timer, bootstrap a fresh window ending
    /// at `now_ms`, publish the skeleton and start ticking.
    pub async fn select_at(
        &mut self,
        vehicle: &VehicleRecord,
        now_ms: i64,
    ) -> Result<(), ViewClosed> {
        self.scheduler.stop().await;
        self.selected = None;

        let profile = VehicleProfile::resolve(vehicle, &self.defaults);
        let engine = SimulationEngine::bootstrap(profile, &self.settings, now_ms);
        let vehicle_name = vehicle.display_name();

        let dashboard = Dashboard {
            title: format!("{} Telemetry", vehicle_name),
            vehicle_id: vehicle.id.clone(),
            vehicle_name,
            license_plate: vehicle.license_plate.clone(),
            theme: self.theme,
            profile: *engine.profile(),
            heat_grids: self.heat_maps.build_all(engine.profile()),
            series: engine.series().clone(),
        };

        tracing::info!(
            "View selected vehicle {} ({} samples, {} grids)",
            vehicle.id,
            dashboard.series.len(),
            dashboard.heat_grids.len()
        );

        self.tx
            .send(StreamMessage::Skeleton(Box::new(dashboard)))
            .await
            .map_err(|_| ViewClosed)?;

        let tx = self.tx.clone();
        let vehicle_id = vehicle.id.clone();
        self.scheduler
            .start(engine, move |series| {
                let update = StreamMessage::SeriesUpdate {
                    vehicle_id: vehicle_id.clone(),
                    series: series.clone(),
                };
                match tx.try_send(update) {
                    Ok(()) => ControlFlow::Continue(()),
                    Err(TrySendError::Full(_)) => {
                        tracing::warn!("Consumer of {} lagging, snapshot dropped", vehicle_id);
                        ControlFlow::Continue(())
                    }
                    Err(TrySendError::Closed(_)) => ControlFlow::Break(()),
                }
            })
            .await;

        self.selected = Some(vehicle.id.clone());
        Ok(())
    }

    /// Stop ticking. Safe to call repeatedly.
    pub async fn shutdown(&mut self) {
        self.scheduler.stop().await;
        if let Some(id) = self.selected.take() {
            tracing::info!("View for vehicle {} torn down", id);
        }
    }
}
