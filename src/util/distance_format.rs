/*
 * Copyright (c) 2003-2023. Trevor Campbell and others.
 */
use crate::units::Distance;

pub struct DistanceFormat {
    to_unit: fn(&Distance) -> f64,
    distance_unit: &'static str,
}

impl DistanceFormat {
    /// Unit is one of "NM", "MI" or "KM". Anything else formats nautical miles.
    pub fn new(unit: &str) -> Self {
        match unit.to_uppercase().as_str() {
            "MI" => Self {
                to_unit: |d| d.to_m() / 1609.344,
                distance_unit: "mi",
            },
            "KM" => Self {
                to_unit: |d| d.to_m() / 1000.0,
                distance_unit: "km",
            },
            _ => Self {
                to_unit: Distance::to_nm,
                distance_unit: "NM",
            },
        }
    }

    pub fn format(&self, distance: &Distance) -> String {
        let converted_distance = (self.to_unit)(distance);
        format!("{:.1} {}", converted_distance, self.distance_unit)
    }
}

#[cfg(test)]
mod tests {
    use crate::units::Distance;

    use super::DistanceFormat;

    #[test]
    fn test_fmt_distance() {
        assert_eq!(DistanceFormat::new("NM").format(&Distance::from_nm(35.0)), "35.0 NM");
        assert_eq!(DistanceFormat::new("Nm").format(&Distance::from_nm(34.0)), "34.0 NM");
        assert_eq!(DistanceFormat::new("MI").format(&Distance::from_nm(34.0)), "39.1 mi");
        assert_eq!(DistanceFormat::new("KM").format(&Distance::from_nm(34.0)), "63.0 km");
    }
}
