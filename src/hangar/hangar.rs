/*
 * Copyright (c) 2003-2023. Trevor Campbell and others.
 */
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use yaml_rust::yaml::Hash;
use yaml_rust::{Yaml, YamlEmitter, YamlLoader};

use crate::model::aircraft::Aircraft;
use crate::preference::APP_INFO;

static DEFAULT_AICRAFT: &str = "---
- cruise-speed: 110
  fuel-consumption: 30
  is-default: true
  name: Cessna C-172
- cruise-speed: 95
  fuel-consumption: 22
  is-default: false
  name: Piper PA-28 Cherokee
- cruise-speed: 85
  fuel-consumption: 15
  is-default: false
  name: Aquila A210
";

const KEY_NAME: &str = "name";
const KEY_CRUISE_SPEED: &str = "cruise-speed";
const KEY_FUEL_CONSUMPTION: &str = "fuel-consumption";
const KEY_IS_DEFAULT: &str = "is-default";

/// One aircraft as stored in the hangar file.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftProfile {
    pub name: String,
    pub cruise_speed_kt: f64,
    pub fuel_consumption_lph: f64,
    pub is_default: bool,
}

impl AircraftProfile {
    pub fn to_aircraft(&self) -> Aircraft {
        Aircraft::new(
            self.name.clone(),
            self.cruise_speed_kt,
            self.fuel_consumption_lph,
        )
    }
}

// This is where all the planes live.
pub struct Hangar {
    aircraft: Vec<AircraftProfile>,
}

impl Hangar {
    /// Loads the hangar file from the user's config directory, or the built in
    /// aircraft if there is none.
    pub fn load() -> Hangar {
        match get_hangar_path() {
            Some(path) => Self::load_from(&path),
            None => Self::from_profiles(parse_hangar(DEFAULT_AICRAFT)),
        }
    }

    pub fn load_from(path: &Path) -> Hangar {
        Self::from_profiles(load_hangar(path))
    }

    pub fn from_profiles(aircraft: Vec<AircraftProfile>) -> Hangar {
        Hangar { aircraft }
    }

    pub fn get_default_aircraft(&self) -> Option<&AircraftProfile> {
        self.aircraft
            .iter()
            .find(|a| a.is_default)
            .or_else(|| self.aircraft.first())
    }

    pub fn get_all(&self) -> &[AircraftProfile] {
        &self.aircraft
    }

    pub fn get(&self, name: &str) -> Option<&AircraftProfile> {
        self.aircraft.iter().find(|a| a.name == name)
    }

    pub fn save_to(&self, path: &Path) {
        save_hangar(path, &self.aircraft);
    }
}

// Load aircraft from yaml file
pub fn load_hangar(path: &Path) -> Vec<AircraftProfile> {
    let mut contents = String::new();
    match File::open(path) {
        Ok(mut file) => {
            if let Err(e) = file.read_to_string(&mut contents) {
                warn!("Unable to read aircraft config {:?}: {}", path, e);
                contents = DEFAULT_AICRAFT.to_string();
            }
        }
        Err(_) => {
            contents = DEFAULT_AICRAFT.to_string();
        }
    }
    parse_hangar(&contents)
}

pub fn parse_hangar(contents: &str) -> Vec<AircraftProfile> {
    let mut hangar: Vec<AircraftProfile> = Vec::new();

    let docs = match YamlLoader::load_from_str(contents) {
        Ok(docs) => docs,
        Err(e) => {
            warn!("Unable to parse aircraft config: {}", e);
            return hangar;
        }
    };
    for doc in docs {
        if let Some(all) = doc.as_vec() {
            for each in all {
                if let Some(map) = each.as_hash() {
                    hangar.push(AircraftProfile {
                        name: get_string(map, KEY_NAME),
                        cruise_speed_kt: get_f64(map, KEY_CRUISE_SPEED),
                        fuel_consumption_lph: get_f64(map, KEY_FUEL_CONSUMPTION),
                        is_default: get_bool(map, KEY_IS_DEFAULT),
                    });
                }
            }
        }
    }
    info!("Loaded {} aircraft", hangar.len());
    hangar
}

fn get_bool(map: &Hash, key: &str) -> bool {
    map.get(&Yaml::String(key.to_string()))
        .unwrap_or(&Yaml::Boolean(false))
        .as_bool()
        .unwrap_or(false)
}

// Integers and reals are both accepted, anything else is unknown
fn get_f64(map: &Hash, key: &str) -> f64 {
    match map.get(&Yaml::String(key.to_string())) {
        Some(Yaml::Integer(i)) => *i as f64,
        Some(y @ Yaml::Real(_)) => y.as_f64().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn get_string(map: &Hash, key: &str) -> String {
    map.get(&Yaml::String(key.to_string()))
        .unwrap_or(&Yaml::String("".to_string()))
        .as_str()
        .unwrap_or("")
        .to_string()
}

pub fn save_hangar(path: &Path, all: &[AircraftProfile]) {
    let mut vec = Vec::new();

    for a in all.iter() {
        let mut inner_map = Hash::new();
        put_string(&mut inner_map, KEY_NAME, &a.name);
        put_f64(&mut inner_map, KEY_CRUISE_SPEED, a.cruise_speed_kt);
        put_f64(&mut inner_map, KEY_FUEL_CONSUMPTION, a.fuel_consumption_lph);
        put_bool(&mut inner_map, KEY_IS_DEFAULT, a.is_default);
        vec.push(Yaml::Hash(inner_map));
    }
    let doc = Yaml::Array(vec);

    let mut out_str = String::new();
    let mut emitter = YamlEmitter::new(&mut out_str);
    if let Err(err) = emitter.dump(&doc) {
        error!("Unable to write aircraft config : {:?}", err);
        return;
    }

    if let Some(parent) = path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            warn!("Unable to create {:?} : {}", parent, err);
        }
    }
    match File::create(path) {
        Ok(mut f) => match f.write_all(out_str.as_bytes()) {
            Ok(_) => {}
            Err(err) => {
                warn!("Unable to save aircraft config : {}", err);
            }
        },
        Err(err) => {
            error!("Unable to save aircraft config : {}", err);
        }
    }
}

fn put_bool(map: &mut Hash, key: &str, v: bool) {
    map.insert(Yaml::String(key.to_string()), Yaml::Boolean(v));
}

// Whole numbers are written as integers so the file stays readable
fn put_f64(map: &mut Hash, key: &str, v: f64) {
    let value = if v.is_finite() && v.fract() == 0.0 {
        Yaml::Integer(v as i64)
    } else {
        Yaml::Real(v.to_string())
    };
    map.insert(Yaml::String(key.to_string()), value);
}

fn put_string(map: &mut Hash, key: &str, v: &str) {
    map.insert(Yaml::String(key.to_string()), Yaml::String(v.to_string()));
}

pub fn get_hangar_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join(APP_INFO.name).join("aircraft.yaml"))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::{parse_hangar, save_hangar, AircraftProfile, Hangar, DEFAULT_AICRAFT};

    #[test]
    fn test_default_hangar() {
        let hangar = Hangar::from_profiles(parse_hangar(DEFAULT_AICRAFT));
        assert_eq!(hangar.get_all().len(), 3);
        let default = hangar.get_default_aircraft().unwrap();
        assert_eq!(default.name, "Cessna C-172");
        assert_eq!(default.cruise_speed_kt, 110.0);
        assert_eq!(default.fuel_consumption_lph, 30.0);
        assert!(hangar.get("Aquila A210").is_some());
        assert!(hangar.get("Concorde").is_none());
    }

    #[test]
    fn test_missing_values() {
        let profiles = parse_hangar("- name: Glider\n  cruise-speed: 52.5\n");
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].cruise_speed_kt, 52.5);
        assert!(profiles[0].fuel_consumption_lph.is_nan());
        assert!(!profiles[0].is_default);

        let aircraft = profiles[0].to_aircraft();
        assert_eq!(aircraft.get_name(), "Glider");
        assert!(aircraft.get_fuel_consumption().is_nan());
    }

    #[test]
    fn test_first_is_default_when_none_marked() {
        let hangar = Hangar::from_profiles(parse_hangar(
            "- name: A\n  cruise-speed: 100\n- name: B\n  cruise-speed: 120\n",
        ));
        assert_eq!(hangar.get_default_aircraft().unwrap().name, "A");
        assert!(Hangar::from_profiles(vec![]).get_default_aircraft().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config").join("aircraft.yaml");
        let profiles = vec![AircraftProfile {
            name: "Robin DR400".to_string(),
            cruise_speed_kt: 125.0,
            fuel_consumption_lph: 37.5,
            is_default: true,
        }];
        save_hangar(&path, &profiles);
        let hangar = Hangar::load_from(&path);
        assert_eq!(hangar.get_all(), profiles.as_slice());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let hangar = Hangar::load_from(&dir.path().join("nothing.yaml"));
        assert_eq!(hangar.get_all().len(), 3);
    }
}
