// Domain layer - Simulation engine and its data model
pub mod cycle;
pub mod dashboard;
pub mod heat_grid;
pub mod series;
pub mod step;
pub mod telemetry;
pub mod vehicle;
