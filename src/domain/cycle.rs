// Drive/idle/rest duty cycle

/// Position class within the repeating duty cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Driving,
    Idle,
    Rest,
}

impl Phase {
    /// Phase of `tick` under the default 60/15/15 cycle.
    pub fn at(tick: u64) -> Self {
        CycleConfig::default().phase(tick)
    }

    pub fn is_driving(self) -> bool {
        matches!(self, Phase::Driving)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Driving => "driving",
            Phase::Idle => "idle",
            Phase::Rest => "rest",
        }
    }
}

/// Tick lengths of each segment of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleConfig {
    pub driving: u64,
    pub idle: u64,
    pub rest: u64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            driving: 60,
            idle: 15,
            rest: 15,
        }
    }
}

impl CycleConfig {
    pub fn len(&self) -> u64 {
        self.driving + self.idle + self.rest
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Classify `tick mod len`. An empty cycle never leaves Driving.
    pub fn phase(&self, tick: u64) -> Phase {
        if self.is_empty() {
            return Phase::Driving;
        }

        let position = tick % self.len();
        if position < self.driving {
            Phase::Driving
        } else if position < self.driving + self.idle {
            Phase::Idle
        } else {
            Phase::Rest
        }
    }
}
