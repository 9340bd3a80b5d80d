use std::ops::Div;

use super::{Speed, Time, METERS_PER_FOOT, METERS_PER_NM};

/// A length, stored in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Distance(f64);

quantity!(Distance);

impl Distance {
    pub const fn from_m(meters: f64) -> Self {
        Self(meters)
    }

    pub fn from_ft(feet: f64) -> Self {
        Self(feet * METERS_PER_FOOT)
    }

    pub fn from_nm(nautical_miles: f64) -> Self {
        Self(nautical_miles * METERS_PER_NM)
    }

    pub fn to_m(&self) -> f64 {
        self.0
    }

    pub fn to_ft(&self) -> f64 {
        self.0 / METERS_PER_FOOT
    }

    pub fn to_nm(&self) -> f64 {
        self.0 / METERS_PER_NM
    }
}

impl Div<Speed> for Distance {
    type Output = Time;

    fn div(self, rhs: Speed) -> Self::Output {
        Time::from_s(self.0 / rhs.to_mps())
    }
}
