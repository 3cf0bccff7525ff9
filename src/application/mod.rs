// Application layer - Use cases over the simulation engine
pub mod dashboard_service;
pub mod fleet_repository;
pub mod fleet_service;
pub mod heat_map_service;
pub mod scheduler;
pub mod simulation;
pub mod streaming_service;
pub mod view;
