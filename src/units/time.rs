use super::SECONDS_PER_HOUR;

/// A duration, stored in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Time(f64);

quantity!(Time);

impl Time {
    pub fn from_s(seconds: f64) -> Self {
        Self(seconds)
    }

    pub fn from_h(hours: f64) -> Self {
        Self(hours * SECONDS_PER_HOUR)
    }

    pub fn to_s(&self) -> f64 {
        self.0
    }

    pub fn to_min(&self) -> f64 {
        self.0 / 60.0
    }

    pub fn to_h(&self) -> f64 {
        self.0 / SECONDS_PER_HOUR
    }

    /// Renders the duration as "H:MM", rounded to the minute.
    /// Unknown or negative durations render as "-:--".
    pub fn to_hours_and_minutes(&self) -> String {
        if !self.is_finite() || self.is_negative() {
            return "-:--".to_string();
        }
        let minutes = self.to_min().round() as u64;
        format!("{}:{:02}", minutes / 60, minutes % 60)
    }
}
