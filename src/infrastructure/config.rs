use crate::application::simulation::SimulationSettings;
use crate::domain::cycle::CycleConfig;
use crate::domain::heat_grid::DEFAULT_SMOOTHING_PASSES;
use crate::domain::vehicle::ProfileDefaults;
use serde::Deserialize;

const CONFIG_FILE: &str = "config/engine";
const ENV_PREFIX: &str = "FLEET";
/// Sample timestamps are whole milliseconds.
const MIN_STEP_SECONDS: f64 = 0.001;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub heat_map: HeatMapConfig,
    #[serde(default)]
    pub fleet: FleetSourceConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    #[serde(default = "default_step_seconds")]
    pub step_seconds: f64,
    #[serde(default = "default_window")]
    pub window: usize,
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    #[serde(default)]
    pub cycle: CycleSettings,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step_seconds: default_step_seconds(),
            window: default_window(),
            channel_capacity: default_channel_capacity(),
            cycle: CycleSettings::default(),
        }
    }
}

impl SimulationConfig {
    pub fn settings(&self) -> SimulationSettings {
        SimulationSettings {
            step_seconds: self.step_seconds,
            window: self.window,
            cycle: CycleConfig {
                driving: self.cycle.driving,
                idle: self.cycle.idle,
                rest: self.cycle.rest,
            },
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CycleSettings {
    #[serde(default = "default_driving")]
    pub driving: u64,
    #[serde(default = "default_idle")]
    pub idle: u64,
    #[serde(default = "default_rest")]
    pub rest: u64,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            driving: default_driving(),
            idle: default_idle(),
            rest: default_rest(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HeatMapConfig {
    #[serde(default = "default_smoothing_passes")]
    pub smoothing_passes: usize,
}

impl Default for HeatMapConfig {
    fn default() -> Self {
        Self {
            smoothing_passes: default_smoothing_passes(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FleetSourceConfig {
    #[serde(default = "default_fleet_path")]
    pub path: String,
}

impl Default for FleetSourceConfig {
    fn default() -> Self {
        Self {
            path: default_fleet_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DefaultsConfig {
    #[serde(default = "default_avg_speed")]
    pub avg_speed: f64,
    #[serde(default = "default_percentage")]
    pub battery_health: f64,
    #[serde(default = "default_percentage")]
    pub fuel_efficiency: f64,
    #[serde(default = "default_utilization")]
    pub utilization_rate: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            avg_speed: default_avg_speed(),
            battery_health: default_percentage(),
            fuel_efficiency: default_percentage(),
            utilization_rate: default_utilization(),
        }
    }
}

impl DefaultsConfig {
    pub fn profile_defaults(&self) -> ProfileDefaults {
        ProfileDefaults {
            avg_speed: self.avg_speed,
            battery_health: self.battery_health,
            fuel_efficiency: self.fuel_efficiency,
            utilization_rate: self.utilization_rate,
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_step_seconds() -> f64 {
    8.0
}

fn default_window() -> usize {
    60
}

fn default_channel_capacity() -> usize {
    16
}

fn default_driving() -> u64 {
    60
}

fn default_idle() -> u64 {
    15
}

fn default_rest() -> u64 {
    15
}

fn default_smoothing_passes() -> usize {
    DEFAULT_SMOOTHING_PASSES
}

fn default_fleet_path() -> String {
    "config/fleet.json".to_string()
}

fn default_avg_speed() -> f64 {
    30.0
}

fn default_percentage() -> f64 {
    92.0
}

fn default_utilization() -> f64 {
    80.0
}

impl AppConfig {
    fn validate(self) -> anyhow::Result<Self> {
        let step = self.simulation.step_seconds;
        if !step.is_finite() || step < MIN_STEP_SECONDS {
            anyhow::bail!(
                "simulation.step_seconds must be at least {}, got {}",
                MIN_STEP_SECONDS,
                step
            );
        }
        Ok(self)
    }
}

/// Load `config/engine.*` (optional) overlaid with `FLEET__SECTION__KEY`
/// environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize::<AppConfig>()?.validate()
}

/// Parse a TOML document into an [`AppConfig`].
pub fn parse_app_config(toml: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    settings.try_deserialize::<AppConfig>()?.validate()
}
