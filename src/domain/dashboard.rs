// Dashboard domain model
use super::heat_grid::HeatGrid;
use super::series::SeriesBuffer;
use super::vehicle::VehicleProfile;

/// Colour scheme requested by the renderer. Carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// Everything the renderer needs when a vehicle is selected.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub title: String,
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub license_plate: Option<String>,
    pub theme: Theme,
    pub profile: VehicleProfile,
    pub heat_grids: Vec<HeatGrid>,
    pub series: SeriesBuffer,
}

/// The five heat grids for one vehicle.
#[derive(Debug, Clone)]
pub struct HeatMapSet {
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub grids: Vec<HeatGrid>,
}

#[derive(Debug, Clone)]
pub enum StreamMessage {
    /// Sent once per selection.
    Skeleton(Box<Dashboard>),
    /// Full window snapshot after one tick.
    SeriesUpdate {
        vehicle_id: String,
        series: SeriesBuffer,
    },
    /// The fleet is empty; nothing was bootstrapped.
    NoData,
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parse() {
        assert_eq!(Theme::parse(None), Theme::Dark);
        assert_eq!(Theme::parse(Some("LIGHT")), Theme::Light);
        assert_eq!(Theme::parse(Some(" light ")), Theme::Light);
        assert_eq!(Theme::parse(Some("solarized")), Theme::Dark);
    }
}
