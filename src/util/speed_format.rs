use crate::units::Speed;

pub struct SpeedFormat {
    to_unit: fn(&Speed) -> f64,
    speed_unit: &'static str,
}

impl SpeedFormat {
    /// Takes the distance unit of the user's preference, "NM", "MI" or "KM".
    pub fn new(unit: &str) -> Self {
        match unit.to_uppercase().as_str() {
            "MI" => Self {
                to_unit: |s| s.to_mps() * 3600.0 / 1609.344,
                speed_unit: "mph",
            },
            "KM" => Self {
                to_unit: Speed::to_kmh,
                speed_unit: "km/h",
            },
            _ => Self {
                to_unit: Speed::to_kt,
                speed_unit: "kt",
            },
        }
    }

    pub fn format(&self, speed: &Speed) -> String {
        let converted_speed = (self.to_unit)(speed);
        format!("{:.0} {}", converted_speed, self.speed_unit)
    }
}

#[cfg(test)]
mod tests {
    use crate::units::Speed;

    use super::SpeedFormat;

    #[test]
    fn test_fmt_speed() {
        assert_eq!(SpeedFormat::new("NM").format(&Speed::from_kt(34.0)), "34 kt");
        assert_eq!(SpeedFormat::new("NM").format(&Speed::from_kt(34.9)), "35 kt");
        assert_eq!(SpeedFormat::new("MI").format(&Speed::from_kt(34.5)), "40 mph");
        assert_eq!(SpeedFormat::new("KM").format(&Speed::from_kt(34.5)), "64 km/h");
    }
}
