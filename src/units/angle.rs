
/// An angle, stored in radians.
///
/// Angles are not normalized on construction, so sums and differences stay
/// exact. Use [`Angle::to_normalized_deg`] when presenting a direction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Angle(f64);

quantity!(Angle);

impl Angle {
    pub fn from_deg(degrees: f64) -> Self {
        Self(degrees.to_radians())
    }

    pub fn from_rad(radians: f64) -> Self {
        Self(radians)
    }

    pub fn to_deg(&self) -> f64 {
        self.0.to_degrees()
    }

    pub fn to_rad(&self) -> f64 {
        self.0
    }

    /// The angle in degrees, folded into [0, 360).
    pub fn to_normalized_deg(&self) -> f64 {
        let deg = self.to_deg().rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if deg >= 360.0 { 0.0 } else { deg }
    }

    pub fn sin(angle: Angle) -> f64 {
        angle.0.sin()
    }

    pub fn cos(angle: Angle) -> f64 {
        angle.0.cos()
    }

    /// Inverse sine. Arguments outside [-1, 1] give an unknown angle.
    pub fn asin(x: f64) -> Angle {
        Angle(x.asin())
    }
}
