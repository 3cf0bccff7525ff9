// Telemetry data domain models
use super::cycle::Phase;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    pub time_ms: i64,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self { time_ms, value }
    }
}

/// Every channel carried by a [`TelemetrySample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Speed,
    Acceleration,
    Torque,
    Power,
    BatteryTemp,
    MotorTemp,
    ControllerTemp,
    Rpm,
    MotorVoltage,
    BatteryPerformance,
    RangeLeft,
    IdleTime,
}

impl Channel {
    pub const ALL: [Channel; 12] = [
        Channel::Speed,
        Channel::Acceleration,
        Channel::Torque,
        Channel::Power,
        Channel::BatteryTemp,
        Channel::MotorTemp,
        Channel::ControllerTemp,
        Channel::Rpm,
        Channel::MotorVoltage,
        Channel::BatteryPerformance,
        Channel::RangeLeft,
        Channel::IdleTime,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Channel::Speed => "speed",
            Channel::Acceleration => "acceleration",
            Channel::Torque => "torque",
            Channel::Power => "power",
            Channel::BatteryTemp => "battery_temp",
            Channel::MotorTemp => "motor_temp",
            Channel::ControllerTemp => "controller_temp",
            Channel::Rpm => "rpm",
            Channel::MotorVoltage => "motor_voltage",
            Channel::BatteryPerformance => "battery_performance",
            Channel::RangeLeft => "range_left",
            Channel::IdleTime => "idle_time",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Channel::Speed => "km/h",
            Channel::Acceleration => "m/s²",
            Channel::Torque => "Nm",
            Channel::Power => "kW",
            Channel::BatteryTemp | Channel::MotorTemp | Channel::ControllerTemp => "°C",
            Channel::Rpm => "rpm",
            Channel::MotorVoltage => "V",
            Channel::BatteryPerformance | Channel::RangeLeft => "%",
            Channel::IdleTime => "min",
        }
    }

    /// Inclusive display domain `(min, max)`.
    pub fn domain(self) -> (f64, f64) {
        match self {
            Channel::Speed => (0.0, 120.0),
            Channel::Acceleration => (-3.0, 3.0),
            Channel::Torque => (0.0, 300.0),
            Channel::Power => (0.0, 250.0),
            Channel::BatteryTemp => (20.0, 65.0),
            Channel::MotorTemp => (25.0, 90.0),
            Channel::ControllerTemp => (25.0, 85.0),
            Channel::Rpm => (0.0, 12_000.0),
            Channel::MotorVoltage => (300.0, 420.0),
            Channel::BatteryPerformance => (0.0, 100.0),
            Channel::RangeLeft => (0.0, 100.0),
            Channel::IdleTime => (0.0, 60.0),
        }
    }

    pub fn clamp(self, value: f64) -> f64 {
        let (min, max) = self.domain();
        value.clamp(min, max)
    }
}

/// One timestamped multi-channel observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    /// Milliseconds since the Unix epoch.
    pub ts: i64,
    /// Cycle counter the sample was produced at.
    pub tick: u64,
    pub phase: Phase,
    pub speed: f64,
    pub acceleration: f64,
    pub torque: f64,
    pub power: f64,
    pub battery_temp: f64,
    pub motor_temp: f64,
    pub controller_temp: f64,
    pub rpm: f64,
    pub motor_voltage: f64,
    pub battery_performance: f64,
    pub range_left: f64,
    pub idle_time: f64,
}

impl TelemetrySample {
    pub fn value(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Speed => self.speed,
            Channel::Acceleration => self.acceleration,
            Channel::Torque => self.torque,
            Channel::Power => self.power,
            Channel::BatteryTemp => self.battery_temp,
            Channel::MotorTemp => self.motor_temp,
            Channel::ControllerTemp => self.controller_temp,
            Channel::Rpm => self.rpm,
            Channel::MotorVoltage => self.motor_voltage,
            Channel::BatteryPerformance => self.battery_performance,
            Channel::RangeLeft => self.range_left,
            Channel::IdleTime => self.idle_time,
        }
    }

    /// True when every channel sits inside its declared domain.
    pub fn within_domains(&self) -> bool {
        Channel::ALL.iter().all(|&channel| {
            let (min, max) = channel.domain();
            let value = self.value(channel);
            value >= min && value <= max
        })
    }
}
