use std::cell::Cell;

use async_channel::Receiver;

use crate::event::{Event, EventManager, EventType};
use crate::units::Speed;

pub const MIN_CRUISE_SPEED_KT: f64 = 40.0;
pub const MAX_CRUISE_SPEED_KT: f64 = 400.0;
pub const MIN_FUEL_CONSUMPTION_LPH: f64 = 5.0;
pub const MAX_FUEL_CONSUMPTION_LPH: f64 = 100.0;

/// Performance figures of the aircraft flying the route.
///
/// Values are unknown (NaN) until set. Values outside the plausible range are
/// stored as unknown. Every change is announced with `Event::AircraftChanged`.
pub struct Aircraft {
    name: String,
    cruise_speed: Cell<Speed>,
    fuel_consumption: Cell<f64>,
    events: EventManager,
}

impl Aircraft {
    pub fn new(name: String, cruise_speed_kt: f64, fuel_consumption_lph: f64) -> Self {
        let aircraft = Aircraft {
            name,
            ..Default::default()
        };
        aircraft.cruise_speed.set(Self::checked_speed(cruise_speed_kt));
        aircraft.fuel_consumption.set(Self::checked_consumption(fuel_consumption_lph));
        aircraft
    }

    fn checked_speed(kt: f64) -> Speed {
        if (MIN_CRUISE_SPEED_KT..=MAX_CRUISE_SPEED_KT).contains(&kt) {
            Speed::from_kt(kt)
        } else {
            Speed::default()
        }
    }

    fn checked_consumption(lph: f64) -> f64 {
        if (MIN_FUEL_CONSUMPTION_LPH..=MAX_FUEL_CONSUMPTION_LPH).contains(&lph) {
            lph
        } else {
            f64::NAN
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// True air speed in cruise
    pub fn get_cruise_speed(&self) -> Speed {
        self.cruise_speed.get()
    }

    pub fn get_cruise_speed_kt(&self) -> f64 {
        self.cruise_speed.get().to_kt()
    }

    /// Fuel consumption in liters per hour
    pub fn get_fuel_consumption(&self) -> f64 {
        self.fuel_consumption.get()
    }

    pub fn set_cruise_speed_kt(&self, kt: f64) {
        let new = Self::checked_speed(kt);
        if !same(new.to_kt(), self.get_cruise_speed_kt()) {
            self.cruise_speed.set(new);
            self.events.notify_listeners(Event::AircraftChanged);
        }
    }

    pub fn set_fuel_consumption(&self, lph: f64) {
        let new = Self::checked_consumption(lph);
        if !same(new, self.get_fuel_consumption()) {
            self.fuel_consumption.set(new);
            self.events.notify_listeners(Event::AircraftChanged);
        }
    }

    pub fn register_listener(&self) -> Option<Receiver<Event>> {
        self.events.register_listener(&[EventType::AircraftChanged])
    }
}

impl Default for Aircraft {
    fn default() -> Self {
        Self {
            name: "".to_string(),
            cruise_speed: Cell::new(Speed::default()),
            fuel_consumption: Cell::new(f64::NAN),
            events: EventManager::new(),
        }
    }
}

// Equal, treating two unknown values as the same
pub(crate) fn same(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

#[cfg(test)]
mod tests {
    use crate::event::drain;

    use super::Aircraft;

    #[test]
    fn test_new() {
        let a = Aircraft::new("C172".to_string(), 110.0, 30.0);
        assert_eq!(a.get_name(), "C172");
        assert!((a.get_cruise_speed_kt() - 110.0).abs() < 1e-9);
        assert_eq!(a.get_fuel_consumption(), 30.0);
    }

    #[test]
    fn test_out_of_range_is_unknown() {
        let a = Aircraft::new("Fast".to_string(), 1000.0, 2.0);
        assert!(!a.get_cruise_speed().is_finite());
        assert!(a.get_fuel_consumption().is_nan());
        let a = Aircraft::default();
        assert!(!a.get_cruise_speed().is_finite());
    }

    #[test]
    fn test_change_notification() {
        let a = Aircraft::new("C172".to_string(), 110.0, 30.0);
        let rx = a.register_listener().unwrap();

        a.set_cruise_speed_kt(110.0);
        assert_eq!(drain(&rx), 0);

        a.set_cruise_speed_kt(120.0);
        a.set_fuel_consumption(25.0);
        assert_eq!(drain(&rx), 2);

        a.set_fuel_consumption(f64::NAN);
        a.set_fuel_consumption(500.0);
        assert_eq!(drain(&rx), 1);
    }
}
