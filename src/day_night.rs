use chrono::Timelike;

use crate::config;

/// Behavioral mode derived from the wall-clock hour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayNightMode {
    Normal,
    /// Evening: dimmed CRT palette, normal speed.
    NightDim,
    /// Bedtime: dimmed, half speed, no collision sound cue.
    Silent,
}

impl DayNightMode {
    pub fn from_hour(hour: u32) -> Self {
        let hour = hour % 24;
        if hour >= config::SILENT_START || hour < config::SILENT_END {
            DayNightMode::Silent
        } else if hour >= config::NIGHT_DIM_START {
            DayNightMode::NightDim
        } else {
            DayNightMode::Normal
        }
    }

    pub fn speed_multiplier(self) -> f64 {
        match self {
            DayNightMode::Silent => 1.0 / config::SILENT_SPEED_DIV,
            DayNightMode::Normal | DayNightMode::NightDim => 1.0,
        }
    }

    pub fn is_silent(self) -> bool {
        self == DayNightMode::Silent
    }

    pub fn is_dimmed(self) -> bool {
        self != DayNightMode::Normal
    }
}

/// Source of the current wall-clock hour (0-23).
pub trait HourSource {
    fn hour(&self) -> u32;
}

/// Local system time.
pub struct LocalClock;

impl HourSource for LocalClock {
    fn hour(&self) -> u32 {
        chrono::Local::now().hour()
    }
}

/// Pinned hour, for tests and previews.
#[derive(Clone, Copy, Debug)]
pub struct FixedHour(pub u32);

impl HourSource for FixedHour {
    fn hour(&self) -> u32 {
        self.0
    }
}
