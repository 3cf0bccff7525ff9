// HTTP request handlers
use crate::application::fleet_service::FleetError;
use crate::domain::dashboard::Theme;
use crate::infrastructure::chunked_frames::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::infrastructure::wire::{WireVehicle, heat_map_set_to_wire, vehicle_to_wire};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct StreamQuery {
    pub vehicle: Option<String>,
    pub theme: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List all vehicles
pub async fn list_vehicles(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);

    let vehicles: Vec<WireVehicle> = match state.fleet_service.list_vehicles().await {
        Ok(vehicles) => vehicles.iter().map(vehicle_to_wire).collect(),
        Err(e) => return fleet_error_response(FleetError::Source(e)),
    };

    match json_response(&vehicles, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Heat grids for one vehicle
pub async fn vehicle_heat_maps(
    Path(id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);

    match state.dashboard_service.get_heat_maps(&id).await {
        Ok(set) => match json_response(&heat_map_set_to_wire(set), compress).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => fleet_error_response(e),
    }
}

/// Live telemetry stream for the selected vehicle
pub async fn stream_telemetry(
    Query(query): Query<StreamQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let compress = accepts_brotli(&headers);
    let theme = Theme::parse(query.theme.as_deref());

    let rx = state
        .streaming_service
        .stream_vehicle(query.vehicle.as_deref(), theme)
        .await;
    stream_from_receiver(rx, compress).await
}

fn fleet_error_response(error: FleetError) -> Response {
    match error {
        FleetError::NoData => {
            (StatusCode::NOT_FOUND, Json(json!({ "status": "no_data" }))).into_response()
        }
        FleetError::UnknownVehicle(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "status": "unknown_vehicle", "vehicle": id })),
        )
            .into_response(),
        FleetError::Source(e) => {
            tracing::error!("Fleet source failure: {:#}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "status": "error", "message": e.to_string() })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fleet_error_status_codes() {
        assert_eq!(fleet_error_response(FleetError::NoData).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            fleet_error_response(FleetError::UnknownVehicle("x".to_string())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            fleet_error_response(FleetError::Source(anyhow::anyhow!("down"))).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
