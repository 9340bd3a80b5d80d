use crate::earth::coordinate::Coordinate;
use crate::model::waypoint::Waypoint;

pub const FEATURE_EDTF: &str = r#"{
    "type": "Feature",
    "geometry": {"type": "Point", "coordinates": [7.8325, 48.0225, 244.0]},
    "properties": {
        "NAM": "Freiburg",
        "COD": "EDTF",
        "ELE": 801,
        "COM": "119.000",
        "RWY": ["16", "34"],
        "CAT": "AD-PAVED",
        "TYP": "AD"
    }
}"#;

pub fn make_navaid(name: &str, code: &str, cat: &str, lat: f64, lon: f64) -> Waypoint {
    Waypoint::default()
        .with_coordinate(Coordinate::new(lat, lon))
        .with_property("NAM", name)
        .with_property("COD", code)
        .with_property("CAT", cat)
        .with_property("TYP", "NAV")
}

pub fn make_waypoint(lat: f64, lon: f64) -> Waypoint {
    Waypoint::from_coordinate(Coordinate::new(lat, lon))
}

pub fn is_between(variable: f64, bottom: f64, top: f64) -> bool {
    variable >= bottom && variable <= top
}
