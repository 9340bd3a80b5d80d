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
#![forbid(unsafe_code)]

//! Flight route model: waypoints, legs with wind triangle, route summary and
//! the binary route file.

pub mod codec;
pub mod earth;
pub mod event;
pub mod hangar;
pub mod model;
pub mod preference;
pub mod units;
pub mod util;

pub use earth::coordinate::Coordinate;
pub use model::aircraft::Aircraft;
pub use model::leg::Leg;
pub use model::route::{Route, RouteObject, WaypointId};
pub use model::waypoint::Waypoint;
pub use model::wind::Wind;
pub use util::route_store::RouteStore;
