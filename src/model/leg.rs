/*
 * Copyright (c) 2003-2023. Trevor Campbell and others.
 *
 * This file is part of Kelpie Flight Route.
 *
 * Kelpie Flight Route is free software; you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation; either version 2 of the License, or
 * (at your option) any later version.
 *
 * Kelpie Flight Route is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Kelpie Flight Route; if not, write to the Free Software
 * Foundation, Inc., 59 Temple Place, Suite 330, Boston, MA  02111-1307  USA
 *
 * Contributors:
 *      Trevor Campbell
 *
 */

use std::rc::{Rc, Weak};

use crate::model::aircraft::Aircraft;
use crate::model::waypoint::Waypoint;
use crate::model::wind::Wind;
use crate::units::{Angle, Distance, Speed, Time};
use crate::util::distance_format::DistanceFormat;

/// Below this length the course between two points is not meaningful.
pub const MIN_LEG_LENGTH: Distance = Distance::from_m(100.0);

// Above this ratio of wind speed to true air speed the wind triangle is not solved
const MAX_WIND_RATIO: f64 = 0.75;

/// The straight segment between two consecutive waypoints of a route.
///
/// A leg keeps its own copies of the end points. Aircraft and wind are looked up
/// on every call, so the figures follow changes to either without rebuilding the
/// leg. A provider that has gone away counts as missing data.
#[derive(Debug, Clone)]
pub struct Leg {
    start: Waypoint,
    end: Waypoint,
    aircraft: Weak<Aircraft>,
    wind: Weak<Wind>,
}

// Inputs of the wind triangle, all known
struct WindTriangle {
    tas: Speed,
    wind_speed: Speed,
    wind_direction: Angle,
    fuel_consumption: f64,
}

impl Leg {
    pub fn new(start: Waypoint, end: Waypoint, aircraft: Weak<Aircraft>, wind: Weak<Wind>) -> Self {
        Self {
            start,
            end,
            aircraft,
            wind,
        }
    }

    pub fn start(&self) -> &Waypoint {
        &self.start
    }

    pub fn end(&self) -> &Waypoint {
        &self.end
    }

    pub fn is_valid(&self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }

    /// Great circle distance, zero for an invalid leg.
    pub fn distance(&self) -> Distance {
        if !self.is_valid() {
            return Distance::from_m(0.0);
        }
        self.start.coordinate().distance_to(self.end.coordinate())
    }

    /// True course, unknown for an invalid leg or one shorter than `MIN_LEG_LENGTH`.
    pub fn tc(&self) -> Angle {
        if !self.is_valid() || self.distance() < MIN_LEG_LENGTH {
            return Angle::default();
        }
        self.start.coordinate().bearing_to(self.end.coordinate())
    }

    pub fn has_data_for_wind_triangle(&self) -> bool {
        self.wind_triangle().is_some()
    }

    fn wind_triangle(&self) -> Option<WindTriangle> {
        let aircraft = self.aircraft.upgrade()?;
        let wind = self.wind.upgrade()?;
        let triangle = WindTriangle {
            tas: aircraft.get_cruise_speed(),
            wind_speed: wind.get_speed(),
            wind_direction: wind.get_direction(),
            fuel_consumption: aircraft.get_fuel_consumption(),
        };
        if !triangle.tas.is_finite()
            || !triangle.wind_speed.is_finite()
            || !triangle.wind_direction.is_finite()
        {
            return None;
        }
        if triangle.wind_speed > triangle.tas * MAX_WIND_RATIO {
            return None;
        }
        Some(triangle)
    }

    /// Wind correction angle
    pub fn wca(&self) -> Angle {
        let Some(w) = self.wind_triangle() else {
            return Angle::default();
        };
        let ratio = w.wind_speed / w.tas;
        Angle::asin(-Angle::sin(self.tc() - w.wind_direction) * ratio)
    }

    /// True heading
    pub fn th(&self) -> Angle {
        self.tc() + self.wca()
    }

    /// Ground speed
    pub fn gs(&self) -> Speed {
        let Some(w) = self.wind_triangle() else {
            return Speed::default();
        };
        let tas = w.tas.to_mps();
        let ws = w.wind_speed.to_mps();
        let cos = Angle::cos(w.wind_direction - self.th());
        Speed::from_mps((tas * tas + ws * ws - 2.0 * tas * ws * cos).sqrt())
    }

    pub fn time(&self) -> Time {
        self.distance() / self.gs()
    }

    /// Fuel used on the leg, in liters
    pub fn fuel(&self) -> f64 {
        let Some(w) = self.wind_triangle() else {
            return f64::NAN;
        };
        w.fuel_consumption * self.time().to_h()
    }

    /// One line summary, e.g. "60.0 NM • 0:30 h • TC 90° • TH 85°".
    /// Unknown figures are left out; an invalid leg gives an empty string.
    pub fn description(&self) -> String {
        if !self.is_valid() {
            return "".to_string();
        }
        let mut parts = vec![DistanceFormat::new("NM").format(&self.distance())];
        let time = self.time();
        if time.is_finite() {
            parts.push(format!("{} h", time.to_hours_and_minutes()));
        }
        let tc = self.tc();
        if tc.is_finite() {
            parts.push(format!("TC {}°", whole_degrees(tc)));
        }
        let th = self.th();
        if th.is_finite() {
            parts.push(format!("TH {}°", whole_degrees(th)));
        }
        parts.join(" • ")
    }
}

fn whole_degrees(angle: Angle) -> i32 {
    angle.to_normalized_deg().round() as i32 % 360
}

/// Builds the legs joining each waypoint to the next.
pub(crate) fn legs_between(
    waypoints: &[Waypoint],
    aircraft: &Weak<Aircraft>,
    wind: &Weak<Wind>,
) -> Vec<Leg> {
    waypoints
        .windows(2)
        .map(|pair| Leg::new(pair[0].clone(), pair[1].clone(), aircraft.clone(), wind.clone()))
        .collect()
}

/// Convenience for callers holding strong references.
pub fn leg_with(start: &Waypoint, end: &Waypoint, aircraft: &Rc<Aircraft>, wind: &Rc<Wind>) -> Leg {
    Leg::new(
        start.clone(),
        end.clone(),
        Rc::downgrade(aircraft),
        Rc::downgrade(wind),
    )
}
