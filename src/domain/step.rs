// Telemetry step function
//
// Every sample is a pure function of its predecessor, the active profile, the
// phase and the tick index. No randomness: variation comes from sinusoids of
// the tick so the whole series is reproducible.
use super::cycle::Phase;
use super::telemetry::{Channel, TelemetrySample};
use super::vehicle::VehicleProfile;

/// Low-pass gain applied to speed on every step.
pub const SPEED_GAIN: f64 = 0.2;
/// Torque multiplier while the vehicle is stationary.
pub const IDLE_TORQUE_SCALE: f64 = 0.12;
/// Power multiplier while the vehicle is stationary.
pub const IDLE_POWER_SCALE: f64 = 0.25;

const MOTOR_TEMP_GAIN: f64 = 0.08;
const BATTERY_TEMP_GAIN: f64 = 0.06;
const CONTROLLER_TEMP_GAIN: f64 = 0.1;

const KMH_PER_MS: f64 = 3.6;
const RPM_PER_KMH: f64 = 95.0;
const POWER_CONSTANT: f64 = 9550.0;
const NOMINAL_RANGE_KM: f64 = 320.0;
const REST_RANGE_RECOVERY: f64 = 0.35;
const IDLE_RANGE_DRAIN: f64 = 0.01;
const STATIONARY_SPEED: f64 = 1.0;

/// First-order relaxation of `current` toward `target`.
pub fn low_pass(current: f64, target: f64, gain: f64) -> f64 {
    current + (target - current) * gain
}

/// Speed the vehicle is steering toward at `tick`. Zero outside Driving.
pub fn target_speed(profile: &VehicleProfile, phase: Phase, tick: u64) -> f64 {
    if !phase.is_driving() {
        return 0.0;
    }

    let avg = profile.avg_speed();
    let t = tick as f64;
    let baseline = avg * (0.7 + 0.3 * profile.utilization());

    // Two incommensurate periods so the drive never repeats exactly.
    baseline + 0.22 * avg * (t / 7.0).sin() + 0.08 * avg * (t / 2.3 + 1.1).sin()
}

/// Timestamp increment for one step, in milliseconds.
pub fn step_millis(step_seconds: f64) -> i64 {
    ((step_seconds * 1000.0).round() as i64).max(1)
}

/// Synthetic starting point for a bootstrap: rolling at 60% of the average
/// speed with every temperature at its resting equilibrium.
pub fn seed(profile: &VehicleProfile, tick: u64, ts: i64) -> TelemetrySample {
    let speed = Channel::Speed.clamp(0.6 * profile.avg_speed());
    let rpm = rpm_for(speed);
    let torque = Channel::Torque.clamp(drive_torque(profile, speed, 0.0));
    let power = Channel::Power.clamp(drive_power(torque, rpm));
    let battery_temp =
        Channel::BatteryTemp.clamp(battery_temp_target(profile, Phase::Rest, 0.0, 0.0));
    let motor_temp =
        Channel::MotorTemp.clamp(motor_temp_target(profile, Phase::Rest, 0.0, 0.0, 0.0));
    let controller_temp =
        Channel::ControllerTemp.clamp(controller_temp_target(Phase::Rest, 0.0, 0.0));

    TelemetrySample {
        ts,
        tick,
        phase: Phase::Driving,
        speed,
        acceleration: 0.0,
        torque,
        power,
        battery_temp,
        motor_temp,
        controller_temp,
        rpm,
        motor_voltage: motor_voltage(profile, power),
        battery_performance: battery_performance(profile, battery_temp, 0.0),
        range_left: Channel::RangeLeft
            .clamp(100.0 * profile.health_ratio() * profile.efficiency_ratio()),
        idle_time: 0.0,
    }
}

/// Produce the sample following `previous`.
pub fn step(
    previous: &TelemetrySample,
    profile: &VehicleProfile,
    phase: Phase,
    step_seconds: f64,
    tick: u64,
) -> TelemetrySample {
    let target = target_speed(profile, phase, tick);
    let speed = Channel::Speed.clamp(low_pass(previous.speed, target, SPEED_GAIN));
    let acceleration =
        Channel::Acceleration.clamp((speed - previous.speed) / step_seconds / KMH_PER_MS);
    let push = acceleration.max(0.0) / 3.0;

    let (torque_scale, power_scale) = if phase.is_driving() {
        (1.0, 1.0)
    } else {
        (IDLE_TORQUE_SCALE, IDLE_POWER_SCALE)
    };

    let rpm = rpm_for(speed);
    let drive_torque = Channel::Torque.clamp(drive_torque(profile, speed, push));
    let torque = drive_torque * torque_scale;
    let power = Channel::Power.clamp(drive_power(drive_torque, rpm)) * power_scale;

    let battery_temp = Channel::BatteryTemp.clamp(low_pass(
        previous.battery_temp,
        battery_temp_target(profile, phase, speed, push),
        BATTERY_TEMP_GAIN,
    ));
    let motor_temp = Channel::MotorTemp.clamp(low_pass(
        previous.motor_temp,
        motor_temp_target(profile, phase, speed, push, power),
        MOTOR_TEMP_GAIN,
    ));
    let controller_temp = Channel::ControllerTemp.clamp(low_pass(
        previous.controller_temp,
        controller_temp_target(phase, speed, power),
        CONTROLLER_TEMP_GAIN,
    ));

    let idle_time = if speed < STATIONARY_SPEED {
        Channel::IdleTime.clamp(previous.idle_time + step_seconds / 60.0)
    } else {
        0.0
    };

    TelemetrySample {
        ts: previous.ts + step_millis(step_seconds),
        tick,
        phase,
        speed,
        acceleration,
        torque,
        power,
        battery_temp,
        motor_temp,
        controller_temp,
        rpm,
        motor_voltage: motor_voltage(profile, power),
        battery_performance: battery_performance(profile, battery_temp, push),
        range_left: range_left(previous.range_left, profile, phase, speed, push, step_seconds),
        idle_time,
    }
}

fn rpm_for(speed: f64) -> f64 {
    Channel::Rpm.clamp(speed * RPM_PER_KMH)
}

fn drive_torque(profile: &VehicleProfile, speed: f64, push: f64) -> f64 {
    (15.0 + 1.6 * speed + 45.0 * push) * (1.1 - 0.1 * profile.efficiency_ratio())
}

fn drive_power(torque: f64, rpm: f64) -> f64 {
    torque * rpm / POWER_CONSTANT
}

fn battery_temp_target(profile: &VehicleProfile, phase: Phase, speed: f64, push: f64) -> f64 {
    let wear = 25.0 * (1.0 - profile.health_ratio()) + 10.0 * (1.0 - profile.efficiency_ratio());
    if phase.is_driving() {
        24.0 + 0.16 * speed + 4.0 * push + wear
    } else {
        22.0 + wear
    }
}

fn motor_temp_target(
    profile: &VehicleProfile,
    phase: Phase,
    speed: f64,
    push: f64,
    power: f64,
) -> f64 {
    let wear = 12.0 * (1.0 - profile.health_ratio());
    if phase.is_driving() {
        32.0 + 0.35 * speed + 6.0 * push + 0.05 * power + wear
    } else {
        30.0 + wear
    }
}

fn controller_temp_target(phase: Phase, speed: f64, power: f64) -> f64 {
    if phase.is_driving() {
        30.0 + 0.12 * power + 0.1 * speed
    } else {
        28.0
    }
}

fn motor_voltage(profile: &VehicleProfile, power: f64) -> f64 {
    Channel::MotorVoltage.clamp(330.0 + 80.0 * profile.health_ratio() - 0.12 * power)
}

fn battery_performance(profile: &VehicleProfile, battery_temp: f64, push: f64) -> f64 {
    let thermal_penalty = 0.8 * (battery_temp - 35.0).max(0.0);
    Channel::BatteryPerformance.clamp(profile.battery_health() - thermal_penalty - 3.0 * push)
}

fn range_left(
    previous: f64,
    profile: &VehicleProfile,
    phase: Phase,
    speed: f64,
    push: f64,
    step_seconds: f64,
) -> f64 {
    let next = match phase {
        Phase::Driving => {
            let full_range_km =
                NOMINAL_RANGE_KM * profile.health_ratio() * profile.efficiency_ratio();
            let distance_km = speed * step_seconds / 3600.0;
            previous - distance_km / full_range_km * 100.0 * (1.0 + 0.3 * push)
        }
        Phase::Idle => previous - IDLE_RANGE_DRAIN,
        Phase::Rest => previous + REST_RANGE_RECOVERY,
    };
    Channel::RangeLeft.clamp(next)
}
