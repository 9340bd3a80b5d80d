/*
 * Copyright (c) 2003-2023. Trevor Campbell and others.
 */

//! Waypoint property values and the category vocabulary of the GeoJSON
//! feature files (CAT, TYP, NAM, COD, ...).

use std::fmt;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::codec::{self, CodecError};

pub const KEY_CATEGORY: &str = "CAT";
pub const KEY_TYPE: &str = "TYP";
pub const KEY_NAME: &str = "NAM";
pub const KEY_CODE: &str = "COD";

pub const TYPE_AIRFIELD: &str = "AD";
pub const TYPE_NAVAID: &str = "NAV";
pub const TYPE_WAYPOINT: &str = "WP";

const TAG_NULL: u8 = 0;
const TAG_BOOL: u8 = 1;
const TAG_INTEGER: u8 = 2;
const TAG_REAL: u8 = 3;
const TAG_TEXT: u8 = 4;

/// A scalar property value as found in a feature description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl PropertyValue {
    /// Converts a JSON value. Arrays and objects are not scalars and give `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<PropertyValue> {
        match value {
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
            other => serde_json::from_value(other.clone()).ok(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Integer(i) => Some(*i as f64),
            PropertyValue::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub(crate) fn write_to<W: Write>(&self, w: &mut W) -> codec::Result<()> {
        match self {
            PropertyValue::Null => codec::write_u8(w, TAG_NULL),
            PropertyValue::Bool(b) => {
                codec::write_u8(w, TAG_BOOL)?;
                codec::write_u8(w, u8::from(*b))
            }
            PropertyValue::Integer(i) => {
                codec::write_u8(w, TAG_INTEGER)?;
                codec::write_i64(w, *i)
            }
            PropertyValue::Real(r) => {
                codec::write_u8(w, TAG_REAL)?;
                codec::write_f64(w, *r)
            }
            PropertyValue::Text(s) => {
                codec::write_u8(w, TAG_TEXT)?;
                codec::write_string(w, s)
            }
        }
    }

    pub(crate) fn read_from<R: Read>(r: &mut R) -> codec::Result<PropertyValue> {
        let value = match codec::read_u8(r)? {
            TAG_NULL => PropertyValue::Null,
            TAG_BOOL => PropertyValue::Bool(codec::read_u8(r)? != 0),
            TAG_INTEGER => PropertyValue::Integer(codec::read_i64(r)?),
            TAG_REAL => PropertyValue::Real(codec::read_f64(r)?),
            TAG_TEXT => PropertyValue::Text(codec::read_string(r)?),
            tag => return Err(CodecError::UnknownTag(tag)),
        };
        Ok(value)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => Ok(()),
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Real(r) => write!(f, "{}", r),
            PropertyValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(r: f64) -> Self {
        PropertyValue::Real(r)
    }
}

/// Human readable description of a waypoint category, as shown in
/// parentheses after the name. `None` when the category is unknown.
pub fn category_description(typ: Option<&str>, cat: Option<&str>) -> Option<String> {
    match typ {
        Some(TYPE_AIRFIELD) => Some(
            match cat.unwrap_or("") {
                "AD-GLD" => "Glider site",
                "AD-GRASS" => "Airfield, grass runway",
                "AD-INOP" => "Airfield, inoperative",
                "AD-MIL" => "Military airfield",
                "AD-PAVED" => "Airfield, paved runway",
                "AD-UL" => "Ultralight site",
                "AD-WATER" => "Seaplane base",
                _ => "Airfield",
            }
            .to_string(),
        ),
        // Navaids are described by their kind, e.g. "DVOR-DME"
        Some(TYPE_NAVAID) => cat.filter(|c| !c.is_empty()).map(str::to_string),
        Some(TYPE_WAYPOINT) => Some(
            match cat.unwrap_or("") {
                "MRP" => "Mandatory reporting point",
                "RP" => "Reporting point",
                _ => "Waypoint",
            }
            .to_string(),
        ),
        _ => None,
    }
}

/// The properties worth showing for a category, in display order.
pub fn description_keys(typ: Option<&str>) -> &'static [(&'static str, &'static str)] {
    match typ {
        Some(TYPE_AIRFIELD) => &[
            ("COD", "ICAO"),
            ("ELE", "ELEV"),
            ("RWY", "RWY"),
            ("COM", "COM"),
            ("NAV", "NAV"),
            ("INF", "INFO"),
        ],
        Some(TYPE_NAVAID) => &[("COD", "ID"), ("MHz", "FREQ"), ("kHz", "FREQ"), ("ELE", "ELEV")],
        _ => &[("COD", "ID")],
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json() {
        assert_eq!(PropertyValue::from_json(&json!("EDTF")), Some(PropertyValue::Text("EDTF".into())));
        assert_eq!(PropertyValue::from_json(&json!(804)), Some(PropertyValue::Integer(804)));
        assert_eq!(PropertyValue::from_json(&json!(116.4)), Some(PropertyValue::Real(116.4)));
        assert_eq!(PropertyValue::from_json(&json!(true)), Some(PropertyValue::Bool(true)));
        assert_eq!(PropertyValue::from_json(&json!(null)), Some(PropertyValue::Null));
        assert_eq!(PropertyValue::from_json(&json!([1, 2])), None);
        assert_eq!(PropertyValue::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn test_encode_decode_each_tag() {
        let values = vec![
            PropertyValue::Null,
            PropertyValue::Bool(true),
            PropertyValue::Integer(-7),
            PropertyValue::Real(123.25),
            PropertyValue::Text("DVOR-DME".into()),
        ];
        let mut buf = Vec::new();
        for v in &values {
            v.write_to(&mut buf).unwrap();
        }
        let mut cursor = Cursor::new(buf);
        for v in &values {
            assert_eq!(&PropertyValue::read_from(&mut cursor).unwrap(), v);
        }
    }

    #[test]
    fn test_unknown_tag() {
        let mut cursor = Cursor::new(vec![99u8]);
        assert!(matches!(PropertyValue::read_from(&mut cursor), Err(CodecError::UnknownTag(99))));
    }

    #[test]
    fn test_category_description() {
        assert_eq!(category_description(Some("NAV"), Some("DVOR-DME")).as_deref(), Some("DVOR-DME"));
        assert_eq!(category_description(Some("AD"), Some("AD-GRASS")).as_deref(), Some("Airfield, grass runway"));
        assert_eq!(category_description(Some("AD"), None).as_deref(), Some("Airfield"));
        assert_eq!(category_description(Some("WP"), Some("WP")).as_deref(), Some("Waypoint"));
        assert_eq!(category_description(None, Some("WP")), None);
        assert_eq!(category_description(Some("NAV"), None), None);
    }
}
