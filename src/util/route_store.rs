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

use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::codec::{self, CodecError};
use crate::model::waypoint::Waypoint;
use crate::preference::{PreferenceManager, APP_INFO, ROUTE_FILE};

/// Version of the route file layout
pub const ROUTE_VERSION: u16 = 1;

const ROUTE_FILE_NAME: &str = "flightRoute.dat";

/// Where a route is kept between runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteStore {
    path: Option<PathBuf>,
}

impl RouteStore {
    pub fn at<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// A store that keeps nothing. Routes using it live in memory only.
    pub fn none() -> Self {
        Self { path: None }
    }

    /// The file named by the `Route.file` preference, otherwise
    /// `flightRoute.dat` in the user's data directory.
    pub fn default_location(prefs: &PreferenceManager) -> Self {
        if let Some(file) = prefs.get::<String>(ROUTE_FILE) {
            if !file.is_empty() {
                return Self::at(file);
            }
        }
        match dirs_next::data_dir() {
            Some(dir) => Self::at(dir.join(APP_INFO.name).join(ROUTE_FILE_NAME)),
            None => {
                warn!("No data directory, the route will not be saved");
                Self::none()
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Reads the stored waypoints. A missing, unreadable or damaged file gives
    /// an empty route.
    pub fn load(&self) -> Vec<Waypoint> {
        let Some(path) = &self.path else {
            return Vec::new();
        };
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                info!("No stored route at {:?}: {}", path, e);
                return Vec::new();
            }
        };
        match read_route(file) {
            Ok(waypoints) => {
                info!("Loaded {} waypoints from {:?}", waypoints.len(), path);
                waypoints
            }
            Err(e) => {
                warn!("Discarding stored route {:?}: {}", path, e);
                Vec::new()
            }
        }
    }

    /// Rewrites the whole file. Failures are logged and otherwise ignored.
    pub fn save(&self, waypoints: &[Waypoint]) {
        let Some(path) = &self.path else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Unable to create {:?}: {}", parent, e);
                return;
            }
        }
        let result = File::create(path)
            .map_err(CodecError::from)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                write_route(&mut writer, waypoints)?;
                writer.flush()?;
                Ok(())
            });
        match result {
            Ok(()) => info!("Saved {} waypoints to {:?}", waypoints.len(), path),
            Err(e) => warn!("Unable to save route to {:?}: {}", path, e),
        }
    }
}

/// Decodes a route: the version, then waypoint records up to the end of input.
/// The route is all or nothing; one bad record rejects the lot.
pub fn read_route<R: Read>(mut r: R) -> codec::Result<Vec<Waypoint>> {
    let mut bytes = Vec::new();
    r.read_to_end(&mut bytes)?;
    let len = bytes.len() as u64;
    let mut cursor = Cursor::new(bytes);

    codec::expect_version(&mut cursor, ROUTE_VERSION)?;
    let mut waypoints = Vec::new();
    while cursor.position() < len {
        let waypoint = Waypoint::read_from(&mut cursor)?;
        if !waypoint.is_valid() {
            return Err(CodecError::InvalidRecord);
        }
        waypoints.push(waypoint);
    }
    Ok(waypoints)
}

pub fn write_route<W: Write>(w: &mut W, waypoints: &[Waypoint]) -> codec::Result<()> {
    codec::write_u16(w, ROUTE_VERSION)?;
    for waypoint in waypoints {
        waypoint.write_to(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use crate::codec::CodecError;
    use crate::earth::coordinate::Coordinate;
    use crate::model::test_utils::{make_navaid, make_waypoint};
    use crate::model::waypoint::Waypoint;
    use crate::preference::{PreferenceManager, ROUTE_FILE};

    use super::{read_route, write_route, RouteStore};

    fn sample() -> Vec<Waypoint> {
        vec![
            make_navaid("Karlsruhe", "KRH", "DVOR-DME", 49.0, 8.4),
            make_waypoint(48.5, 8.0),
            Waypoint::from_coordinate(Coordinate::with_altitude(48.0, 7.8, 240.0)),
        ]
    }

    #[test]
    fn test_read_write() {
        let mut buf = Vec::new();
        write_route(&mut buf, &sample()).unwrap();
        assert_eq!(&buf[..2], &[0, 1]);
        assert_eq!(read_route(buf.as_slice()).unwrap(), sample());
    }

    #[test]
    fn test_empty_route() {
        let mut buf = Vec::new();
        write_route(&mut buf, &[]).unwrap();
        assert_eq!(buf, vec![0, 1]);
        assert!(read_route(buf.as_slice()).unwrap().is_empty());
        assert!(matches!(read_route(&[0u8; 0][..]), Err(CodecError::UnexpectedEof)));
    }

    #[test]
    fn test_wrong_version() {
        let mut buf = Vec::new();
        write_route(&mut buf, &sample()).unwrap();
        buf[1] = 2;
        assert!(matches!(
            read_route(buf.as_slice()),
            Err(CodecError::Version { expected: 1, found: 2 })
        ));
    }

    #[test]
    fn test_truncated_route_is_rejected() {
        let mut buf = Vec::new();
        write_route(&mut buf, &sample()).unwrap();
        buf.truncate(buf.len() - 3);
        assert!(read_route(buf.as_slice()).is_err());
    }

    #[test]
    fn test_invalid_waypoint_is_rejected() {
        let mut buf = Vec::new();
        write_route(&mut buf, &[make_waypoint(48.5, 8.0), Waypoint::invalid()]).unwrap();
        assert!(matches!(read_route(buf.as_slice()), Err(CodecError::InvalidRecord)));
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = RouteStore::at(dir.path().join("nested").join("route.dat"));
        assert!(store.load().is_empty());
        store.save(&sample());
        assert_eq!(store.load(), sample());

        fs::write(store.path().unwrap(), [0u8, 7, 1, 2]).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_none_store() {
        let store = RouteStore::none();
        store.save(&sample());
        assert!(store.load().is_empty());
        assert_eq!(store.path(), None);
    }

    #[test]
    fn test_location_from_preferences() {
        let prefs = PreferenceManager::in_memory();
        prefs.put(ROUTE_FILE, "/tmp/elsewhere/route.dat");
        let store = RouteStore::default_location(&prefs);
        assert_eq!(store.path().unwrap().to_str(), Some("/tmp/elsewhere/route.dat"));
    }
}
