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

use std::collections::BTreeMap;
use std::io::{Read, Write};

use geojson::{Feature, GeoJson};
use log::{debug, warn};

use crate::codec;
use crate::earth::coordinate::Coordinate;
use crate::model::leg::MIN_LEG_LENGTH;
use crate::model::properties::{
    category_description, description_keys, PropertyValue, KEY_CATEGORY, KEY_NAME, KEY_TYPE,
    TYPE_WAYPOINT,
};
use crate::util::distance_format::DistanceFormat;

/// A waypoint, such as an airfield, a navaid or a reporting point.
///
/// A waypoint is a coordinate plus the properties of the feature it was made
/// from ("CAT", "TYP", "NAM", "COD", ...). Waypoints are plain values: the
/// route and every leg hold their own copies.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Waypoint {
    coordinate: Coordinate,
    properties: BTreeMap<String, PropertyValue>,
}

impl Waypoint {
    /// Version of the serialized waypoint record
    pub const STREAM_VERSION: u16 = 5;

    /// A waypoint with an invalid coordinate and no properties.
    pub fn invalid() -> Self {
        Self::default()
    }

    /// A generic waypoint at the given position, with CAT="WP" and TYP="WP".
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        Self::default()
            .with_coordinate(coordinate)
            .with_property(KEY_CATEGORY, TYPE_WAYPOINT)
            .with_property(KEY_TYPE, TYPE_WAYPOINT)
    }

    /// Builds a waypoint from a GeoJSON point feature. Anything that is not a
    /// point feature gives an invalid waypoint.
    pub fn from_feature(feature: &Feature) -> Self {
        let position = match feature.geometry.as_ref().map(|g| &g.value) {
            Some(geojson::Value::Point(position)) if position.len() >= 2 => position,
            _ => {
                debug!("Feature has no point geometry");
                return Self::invalid();
            }
        };
        let coordinate = match position.get(2) {
            Some(altitude) => Coordinate::with_altitude(position[1], position[0], *altitude),
            None => Coordinate::new(position[1], position[0]),
        };
        if !coordinate.is_valid() {
            return Self::invalid();
        }

        let mut waypoint = Self::default().with_coordinate(coordinate);
        if let Some(properties) = &feature.properties {
            for (key, value) in properties {
                if let Some(value) = PropertyValue::from_json(value) {
                    waypoint.properties.insert(key.clone(), value);
                }
            }
        }
        waypoint
    }

    /// Parses GeoJSON text holding a single feature.
    pub fn from_geojson_str(text: &str) -> Self {
        match text.parse::<GeoJson>() {
            Ok(GeoJson::Feature(feature)) => Self::from_feature(&feature),
            Ok(_) => {
                warn!("GeoJSON waypoint is not a feature");
                Self::invalid()
            }
            Err(e) => {
                warn!("Unable to parse GeoJSON waypoint: {}", e);
                Self::invalid()
            }
        }
    }

    /// Reads a waypoint record. A wrong version tag or a truncated record
    /// gives an invalid waypoint, which the caller must discard.
    pub fn from_stream<R: Read>(stream: &mut R) -> Self {
        match Self::read_from(stream) {
            Ok(waypoint) => waypoint,
            Err(e) => {
                debug!("Unable to decode waypoint: {}", e);
                Self::invalid()
            }
        }
    }

    pub(crate) fn read_from<R: Read>(r: &mut R) -> codec::Result<Self> {
        codec::expect_version(r, Self::STREAM_VERSION)?;
        let latitude = codec::read_f64(r)?;
        let longitude = codec::read_f64(r)?;
        let altitude = codec::read_f64(r)?;
        let count = codec::read_u32(r)?;

        let mut properties = BTreeMap::new();
        for _ in 0..count {
            let key = codec::read_string(r)?;
            let value = PropertyValue::read_from(r)?;
            properties.insert(key, value);
        }
        Ok(Self {
            coordinate: Coordinate::with_altitude(latitude, longitude, altitude),
            properties,
        })
    }

    /// Serializes the waypoint: version, coordinate, then every property.
    pub fn write_to<W: Write>(&self, w: &mut W) -> codec::Result<()> {
        codec::write_u16(w, Self::STREAM_VERSION)?;
        codec::write_f64(w, self.coordinate.get_latitude())?;
        codec::write_f64(w, self.coordinate.get_longitude())?;
        codec::write_f64(w, self.coordinate.get_altitude().unwrap_or(f64::NAN))?;
        codec::write_u32(w, self.properties.len() as u32)?;
        for (key, value) in &self.properties {
            codec::write_string(w, key)?;
            value.write_to(w)?;
        }
        Ok(())
    }

    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = coordinate;
        self
    }

    pub fn with_property(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn is_valid(&self) -> bool {
        self.coordinate.is_valid()
    }

    /// The property with the given name ("CAT", "TYP", "NAM", ...), if any.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_str)
    }

    pub fn get_name(&self) -> &str {
        self.get_str(KEY_NAME).unwrap_or("")
    }

    /// A name of the form "Karlsruhe (DVOR-DME)". Empty if the waypoint has
    /// no name.
    pub fn extended_name(&self) -> String {
        let name = self.get_name();
        if name.is_empty() {
            return String::new();
        }
        match category_description(self.get_str(KEY_TYPE), self.get_str(KEY_CATEGORY)) {
            Some(description) => format!("{} ({})", name, description),
            None => name.to_string(),
        }
    }

    /// Lines of the form "ICAO EDTF" for the properties relevant to the
    /// waypoint's category, in the category's order.
    pub fn tabular_description(&self) -> Vec<String> {
        description_keys(self.get_str(KEY_TYPE))
            .iter()
            .filter_map(|(key, label)| match self.get(key) {
                None | Some(PropertyValue::Null) => None,
                Some(value) => Some(format!("{} {}", label, value)),
            })
            .collect()
    }

    /// Describes the way from `position` to this waypoint, e.g.
    /// "65.2 NM • TC 276°". The course is left out when the two points
    /// practically coincide.
    pub fn way_from(&self, position: &Coordinate) -> String {
        if !self.is_valid() || !position.is_valid() {
            return String::new();
        }
        let distance = position.distance_to(&self.coordinate);
        let mut result = DistanceFormat::new("NM").format(&distance);
        if distance >= MIN_LEG_LENGTH {
            let course = position.bearing_to(&self.coordinate);
            result.push_str(&format!(" • TC {}°", course.to_normalized_deg().round() as i32 % 360));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::codec;
    use crate::earth::coordinate::Coordinate;
    use crate::model::properties::PropertyValue;
    use crate::model::test_utils::{make_navaid, FEATURE_EDTF};

    use super::Waypoint;

    #[test]
    fn test_invalid() {
        let wp = Waypoint::invalid();
        assert!(!wp.is_valid());
        assert_eq!(wp.properties().count(), 0);
        assert_eq!(wp.extended_name(), "");
    }

    #[test]
    fn test_from_coordinate() {
        let wp = Waypoint::from_coordinate(Coordinate::new(48.0, 7.8));
        assert!(wp.is_valid());
        assert_eq!(wp.get("CAT"), Some(&PropertyValue::Text("WP".into())));
        assert_eq!(wp.get("TYP"), Some(&PropertyValue::Text("WP".into())));
        assert_eq!(wp.get("NAM"), None);
        assert_eq!(wp.extended_name(), "");
    }

    #[test]
    fn test_from_feature() {
        let wp = Waypoint::from_geojson_str(FEATURE_EDTF);
        assert!(wp.is_valid());
        assert_eq!(wp.coordinate().get_latitude(), 48.0225);
        assert_eq!(wp.coordinate().get_longitude(), 7.8325);
        assert_eq!(wp.coordinate().get_altitude(), Some(244.0));
        assert_eq!(wp.get("COD").and_then(|v| v.as_str()), Some("EDTF"));
        assert_eq!(wp.get("ELE"), Some(&PropertyValue::Integer(801)));
        // Arrays are not scalar properties
        assert_eq!(wp.get("RWY"), None);
        assert_eq!(wp.extended_name(), "Freiburg (Airfield, paved runway)");
    }

    #[test]
    fn test_malformed_feature() {
        assert!(!Waypoint::from_geojson_str("not json").is_valid());
        assert!(!Waypoint::from_geojson_str(r#"{"type": "FeatureCollection", "features": []}"#).is_valid());
        let line = r#"{"type": "Feature", "properties": {"NAM": "x"},
            "geometry": {"type": "LineString", "coordinates": [[7.0, 48.0], [8.0, 49.0]]}}"#;
        assert!(!Waypoint::from_geojson_str(line).is_valid());
        let outside = r#"{"type": "Feature", "properties": {},
            "geometry": {"type": "Point", "coordinates": [7.0, 98.0]}}"#;
        assert!(!Waypoint::from_geojson_str(outside).is_valid());
        let no_geometry = r#"{"type": "Feature", "properties": {}, "geometry": null}"#;
        assert!(!Waypoint::from_geojson_str(no_geometry).is_valid());
    }

    #[test]
    fn test_extended_name_navaid() {
        let wp = make_navaid("Karlsruhe", "KRH", "DVOR-DME", 49.0, 8.4);
        assert_eq!(wp.extended_name(), "Karlsruhe (DVOR-DME)");
    }

    #[test]
    fn test_tabular_description() {
        let wp = Waypoint::from_geojson_str(FEATURE_EDTF);
        assert_eq!(wp.tabular_description(), vec!["ICAO EDTF", "ELEV 801", "COM 119.000"]);
        let wp = make_navaid("Karlsruhe", "KRH", "DVOR-DME", 49.0, 8.4).with_property("MHz", "115.950");
        assert_eq!(wp.tabular_description(), vec!["ID KRH", "FREQ 115.950"]);
    }

    #[test]
    fn test_get_missing() {
        let wp = make_navaid("Karlsruhe", "KRH", "DVOR-DME", 49.0, 8.4);
        assert!(wp.get("XYZ").is_none());
    }

    #[test]
    fn test_stream() {
        let wp = Waypoint::from_geojson_str(FEATURE_EDTF).with_property("OPEN", true);
        let mut buf = Vec::new();
        wp.write_to(&mut buf).unwrap();
        let copy = Waypoint::from_stream(&mut Cursor::new(&buf));
        assert_eq!(copy, wp);

        // Every proper prefix of the record is incomplete
        for len in [0, 1, 2, 10, 26, buf.len() - 1] {
            let mut cursor = Cursor::new(&buf[..len]);
            assert!(!Waypoint::from_stream(&mut cursor).is_valid(), "prefix of {} bytes", len);
        }
    }

    #[test]
    fn test_stream_wrong_version() {
        let wp = Waypoint::from_coordinate(Coordinate::new(48.0, 7.8));
        let mut buf = Vec::new();
        wp.write_to(&mut buf).unwrap();
        buf[1] = 4;
        assert!(!Waypoint::from_stream(&mut Cursor::new(&buf)).is_valid());
    }

    #[test]
    fn test_stream_without_altitude() {
        let wp = Waypoint::from_coordinate(Coordinate::new(48.0, 7.8));
        let mut buf = Vec::new();
        wp.write_to(&mut buf).unwrap();
        let mut cursor = Cursor::new(&buf);
        assert_eq!(codec::read_u16(&mut cursor).unwrap(), Waypoint::STREAM_VERSION);
        let copy = Waypoint::from_stream(&mut Cursor::new(&buf));
        assert_eq!(copy.coordinate().get_altitude(), None);
        assert_eq!(copy, wp);
    }

    #[test]
    fn test_way_from() {
        let wp = Waypoint::from_coordinate(Coordinate::new(0.0, 1.0));
        assert_eq!(wp.way_from(&Coordinate::new(0.0, 0.0)), "60.0 NM • TC 90°");
        assert_eq!(wp.way_from(&Coordinate::new(0.0, 1.0)), "0.0 NM");
        assert_eq!(wp.way_from(&Coordinate::invalid()), "");
    }
}
