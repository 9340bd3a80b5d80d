use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::units::{Angle, Distance};
use crate::util::lat_long_format::LatLongFormat;

/// A position on the earth. Latitude and longitude are in degrees, the
/// optional altitude in meters.
///
/// A coordinate whose latitude or longitude is NaN or out of range is invalid
/// and must not be used for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
    altitude: Option<f64>,
}

impl Coordinate {
    /// Mean earth radius in meters
    const EARTH_RADIUS: f64 = 6_371_007.2;

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
        }
    }

    pub fn with_altitude(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: if altitude.is_finite() { Some(altitude) } else { None },
        }
    }

    pub fn invalid() -> Self {
        Self {
            latitude: f64::NAN,
            longitude: f64::NAN,
            altitude: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    // Central angle between the two points, in radians (haversine).
    fn central_angle(&self, l: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = l.latitude.to_radians();
        let d_lon = (self.longitude - l.longitude).to_radians();
        let d_lat = lat1 - lat2;

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// Great circle distance. Unknown if either coordinate is invalid.
    pub fn distance_to(&self, l: &Coordinate) -> Distance {
        if !self.is_valid() || !l.is_valid() {
            return Distance::default();
        }
        Distance::from_m(Self::EARTH_RADIUS * self.central_angle(l).abs())
    }

    /// Initial great circle course (azimuth) towards `l`, in [0, 360) degrees.
    pub fn bearing_to(&self, l: &Coordinate) -> Angle {
        if !self.is_valid() || !l.is_valid() {
            return Angle::default();
        }
        let lat1 = self.latitude.to_radians();
        let lat2 = l.latitude.to_radians();
        let d_lon = (l.longitude - self.longitude).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
        let mut heading = y.atan2(x);
        if heading < 0.0 {
            heading += 2.0 * PI;
        }
        Angle::from_rad(heading)
    }

    pub fn bearing_to_deg(&self, l: &Coordinate) -> f64 {
        self.bearing_to(l).to_deg()
    }

    /// The point reached by travelling `distance` along the great circle
    /// starting with course `heading`.
    pub fn coordinate_at(&self, distance: Distance, heading: Angle) -> Coordinate {
        let d = distance.to_m() / Self::EARTH_RADIUS;
        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();
        let tc = heading.to_rad();
        let lat = (lat1.sin() * d.cos() + lat1.cos() * d.sin() * tc.cos()).asin();
        let d_lon = (tc.sin() * d.sin() * lat1.cos()).atan2(d.cos() - lat1.sin() * lat.sin());

        let lon = (lon1 + d_lon + PI).rem_euclid(2.0 * PI) - PI;

        Coordinate::new(lat.to_degrees(), lon.to_degrees())
    }

    pub fn get_latitude(&self) -> f64 {
        self.latitude
    }

    pub fn get_latitude_as_string(&self) -> String {
        let formatter = LatLongFormat::lat_format();
        formatter.format(self.latitude)
    }

    pub fn get_longitude(&self) -> f64 {
        self.longitude
    }

    pub fn get_longitude_as_string(&self) -> String {
        let formatter = LatLongFormat::long_format();
        formatter.format(self.longitude)
    }

    pub fn get_altitude(&self) -> Option<f64> {
        self.altitude
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::invalid()
    }
}

impl From<&Coordinate> for geo::Point<f64> {
    fn from(c: &Coordinate) -> Self {
        geo::Point::new(c.longitude, c.latitude)
    }
}
