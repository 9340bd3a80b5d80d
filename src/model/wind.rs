use std::cell::Cell;

use async_channel::Receiver;

use crate::event::{Event, EventManager, EventType};
use crate::model::aircraft::same;
use crate::preference::{PreferenceManager, WIND_DIRECTION, WIND_SPEED};
use crate::units::{Angle, Speed};

pub const MAX_WIND_SPEED_KT: f64 = 100.0;

/// Wind at cruise altitude. Direction is where the wind comes from.
pub struct Wind {
    speed: Cell<Speed>,
    direction: Cell<Angle>,
    events: EventManager,
}

impl Wind {
    pub fn new(speed_kt: f64, direction_deg: f64) -> Self {
        let wind = Wind::default();
        wind.speed.set(Self::checked_speed(speed_kt));
        wind.direction.set(Self::checked_direction(direction_deg));
        wind
    }

    /// Restores the wind stored with `save`. Missing values are unknown.
    pub fn from_preferences(prefs: &PreferenceManager) -> Self {
        Self::new(
            prefs.get::<f64>(WIND_SPEED).unwrap_or(f64::NAN),
            prefs.get::<f64>(WIND_DIRECTION).unwrap_or(f64::NAN),
        )
    }

    pub fn save(&self, prefs: &PreferenceManager) {
        let speed = self.get_speed_kt();
        if speed.is_nan() {
            prefs.remove(WIND_SPEED);
        } else {
            prefs.put(WIND_SPEED, speed);
        }
        let direction = self.get_direction_deg();
        if direction.is_nan() {
            prefs.remove(WIND_DIRECTION);
        } else {
            prefs.put(WIND_DIRECTION, direction);
        }
    }

    fn checked_speed(kt: f64) -> Speed {
        if (0.0..=MAX_WIND_SPEED_KT).contains(&kt) {
            Speed::from_kt(kt)
        } else {
            Speed::default()
        }
    }

    fn checked_direction(deg: f64) -> Angle {
        if (0.0..=360.0).contains(&deg) {
            Angle::from_deg(deg)
        } else {
            Angle::default()
        }
    }

    pub fn get_speed(&self) -> Speed {
        self.speed.get()
    }

    pub fn get_speed_kt(&self) -> f64 {
        self.speed.get().to_kt()
    }

    pub fn get_direction(&self) -> Angle {
        self.direction.get()
    }

    pub fn get_direction_deg(&self) -> f64 {
        self.direction.get().to_deg()
    }

    pub fn set_speed_kt(&self, kt: f64) {
        let new = Self::checked_speed(kt);
        if !same(new.to_kt(), self.get_speed_kt()) {
            self.speed.set(new);
            self.events.notify_listeners(Event::WindChanged);
        }
    }

    pub fn set_direction_deg(&self, deg: f64) {
        let new = Self::checked_direction(deg);
        if !same(new.to_deg(), self.get_direction_deg()) {
            self.direction.set(new);
            self.events.notify_listeners(Event::WindChanged);
        }
    }

    pub fn register_listener(&self) -> Option<Receiver<Event>> {
        self.events.register_listener(&[EventType::WindChanged])
    }
}

impl Default for Wind {
    fn default() -> Self {
        Self {
            speed: Cell::new(Speed::default()),
            direction: Cell::new(Angle::default()),
            events: EventManager::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::event::drain;
    use crate::preference::PreferenceManager;

    use super::Wind;

    #[test]
    fn test_range() {
        let w = Wind::new(20.0, 270.0);
        assert!((w.get_speed_kt() - 20.0).abs() < 1e-9);
        assert!((w.get_direction_deg() - 270.0).abs() < 1e-9);

        let w = Wind::new(120.0, 361.0);
        assert!(w.get_speed_kt().is_nan());
        assert!(w.get_direction_deg().is_nan());

        let w = Wind::new(0.0, 360.0);
        assert_eq!(w.get_speed_kt(), 0.0);
        assert!((w.get_direction_deg() - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_change_notification() {
        let w = Wind::default();
        let rx = w.register_listener().unwrap();
        w.set_speed_kt(f64::NAN);
        assert_eq!(drain(&rx), 0);
        w.set_speed_kt(15.0);
        w.set_direction_deg(90.0);
        w.set_direction_deg(90.0);
        assert_eq!(drain(&rx), 2);
    }

    #[test]
    fn test_preferences() {
        let prefs = PreferenceManager::in_memory();
        let w = Wind::from_preferences(&prefs);
        assert!(w.get_speed_kt().is_nan());

        w.set_speed_kt(25.0);
        w.set_direction_deg(180.0);
        w.save(&prefs);
        let restored = Wind::from_preferences(&prefs);
        assert!((restored.get_speed_kt() - 25.0).abs() < 1e-9);
        assert!((restored.get_direction_deg() - 180.0).abs() < 1e-9);

        w.set_speed_kt(f64::NAN);
        w.save(&prefs);
        assert!(Wind::from_preferences(&prefs).get_speed_kt().is_nan());
    }
}
