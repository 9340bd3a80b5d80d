use std::ops::Div;

use super::{METERS_PER_NM, SECONDS_PER_HOUR};

/// A speed, stored in meters per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Speed(f64);

quantity!(Speed);

const MPS_PER_KT: f64 = METERS_PER_NM / SECONDS_PER_HOUR;

impl Speed {
    pub fn from_mps(meters_per_second: f64) -> Self {
        Self(meters_per_second)
    }

    pub fn from_kt(knots: f64) -> Self {
        Self(knots * MPS_PER_KT)
    }

    pub fn from_kmh(kilometers_per_hour: f64) -> Self {
        Self(kilometers_per_hour / 3.6)
    }

    pub fn to_mps(&self) -> f64 {
        self.0
    }

    pub fn to_kt(&self) -> f64 {
        self.0 / MPS_PER_KT
    }

    pub fn to_kmh(&self) -> f64 {
        self.0 * 3.6
    }
}

/// The ratio of two speeds is a plain number.
impl Div for Speed {
    type Output = f64;

    fn div(self, rhs: Self) -> Self::Output {
        self.0 / rhs.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let s = Speed::from_kt(100.0);
        assert!((s.to_kt() - 100.0).abs() < 1e-9);
        assert!((s.to_kmh() - 185.2).abs() < 1e-9);
        assert!((Speed::from_kmh(36.0).to_mps() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratio() {
        assert!((Speed::from_kt(20.0) / Speed::from_kt(100.0) - 0.2).abs() < 1e-12);
        assert!((Speed::from_kt(20.0) / Speed::default()).is_nan());
    }
}
