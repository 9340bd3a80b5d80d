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

//! The flight route: an ordered list of waypoints and the legs between them.
//!
//! Every change to the waypoint list is handled the same way. The legs are
//! rebuilt, the route is written to its store, and then listeners receive
//! `Event::WaypointsChanged` followed by `Event::SummaryChanged`.

use std::fmt;
use std::rc::Weak;

use async_channel::Receiver;
use geo::{LineString, Point};
use log::debug;

use crate::earth::coordinate::Coordinate;
use crate::event::{drain, Event, EventManager, EventType};
use crate::model::aircraft::Aircraft;
use crate::model::leg::{legs_between, Leg};
use crate::model::waypoint::Waypoint;
use crate::model::wind::Wind;
use crate::units::{Distance, Time};
use crate::util::distance_format::DistanceFormat;
use crate::util::route_store::RouteStore;

/// Time and fuel are only added up once the route is at least this long.
pub const SUMMARY_MIN_DISTANCE: Distance = Distance::from_m(100.0);

/// Identifies one entry of a route. Ids stay with their waypoint when the route
/// is reordered and are never reused by the same route.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct WaypointId(u64);

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Waypoints and legs in flight order, as a route is usually displayed.
#[derive(Debug, Clone, Copy)]
pub enum RouteObject<'a> {
    Waypoint(WaypointId, &'a Waypoint),
    Leg(&'a Leg),
}

pub struct Route {
    ids: Vec<WaypointId>,
    waypoints: Vec<Waypoint>,
    legs: Vec<Leg>,
    next_id: u64,
    aircraft: Weak<Aircraft>,
    wind: Weak<Wind>,
    provider_events: Vec<Receiver<Event>>,
    events: EventManager,
    store: RouteStore,
}

impl Route {
    /// Creates a route restored from `store`. Aircraft and wind may be dropped
    /// at any time; the route then computes without them.
    pub fn new(aircraft: Weak<Aircraft>, wind: Weak<Wind>, store: RouteStore) -> Self {
        let mut provider_events = Vec::new();
        if let Some(rx) = aircraft.upgrade().and_then(|a| a.register_listener()) {
            provider_events.push(rx);
        }
        if let Some(rx) = wind.upgrade().and_then(|w| w.register_listener()) {
            provider_events.push(rx);
        }

        let mut route = Self {
            ids: Vec::new(),
            waypoints: Vec::new(),
            legs: Vec::new(),
            next_id: 0,
            aircraft,
            wind,
            provider_events,
            events: EventManager::new(),
            store,
        };
        for waypoint in route.store.load() {
            let id = route.next_id();
            route.ids.push(id);
            route.waypoints.push(waypoint);
        }
        route.update_legs();
        route
    }

    fn next_id(&mut self) -> WaypointId {
        let id = WaypointId(self.next_id);
        self.next_id += 1;
        id
    }

    fn update_legs(&mut self) {
        self.legs = legs_between(&self.waypoints, &self.aircraft, &self.wind);
    }

    // Common tail of every mutation
    fn waypoints_changed(&mut self) {
        self.update_legs();
        self.store.save(&self.waypoints);
        self.events.notify_listeners(Event::WaypointsChanged);
        self.events.notify_listeners(Event::SummaryChanged);
    }

    /// Appends a copy of `waypoint`. Invalid waypoints are ignored.
    pub fn append(&mut self, waypoint: &Waypoint) -> Option<WaypointId> {
        if !waypoint.is_valid() {
            debug!("Ignoring invalid waypoint");
            return None;
        }
        let id = self.next_id();
        self.ids.push(id);
        self.waypoints.push(waypoint.clone());
        debug!("Appended waypoint {} '{}'", id, waypoint.get_name());
        self.waypoints_changed();
        Some(id)
    }

    pub fn append_coordinate(&mut self, coordinate: Coordinate) -> Option<WaypointId> {
        self.append(&Waypoint::from_coordinate(coordinate))
    }

    /// Removes the waypoint with the given id and returns it.
    pub fn remove_waypoint(&mut self, id: WaypointId) -> Option<Waypoint> {
        let index = self.index_of(id)?;
        self.remove_at(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Waypoint> {
        if index >= self.waypoints.len() {
            return None;
        }
        let id = self.ids.remove(index);
        let waypoint = self.waypoints.remove(index);
        debug!("Removed waypoint {}", id);
        self.waypoints_changed();
        Some(waypoint)
    }

    /// Swaps the waypoint with its predecessor. Does nothing for the first one.
    pub fn move_up(&mut self, id: WaypointId) {
        match self.index_of(id) {
            Some(index) if index > 0 => self.swap(index - 1, index),
            _ => {}
        }
    }

    /// Swaps the waypoint with its successor. Does nothing for the last one.
    pub fn move_down(&mut self, id: WaypointId) {
        match self.index_of(id) {
            Some(index) if index + 1 < self.waypoints.len() => self.swap(index, index + 1),
            _ => {}
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.ids.swap(a, b);
        self.waypoints.swap(a, b);
        self.waypoints_changed();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.waypoints.clear();
        self.waypoints_changed();
    }

    pub fn reverse(&mut self) {
        self.ids.reverse();
        self.waypoints.reverse();
        self.waypoints_changed();
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn ids(&self) -> &[WaypointId] {
        &self.ids
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn index_of(&self, id: WaypointId) -> Option<usize> {
        self.ids.iter().position(|i| *i == id)
    }

    pub fn id_at(&self, index: usize) -> Option<WaypointId> {
        self.ids.get(index).copied()
    }

    pub fn get(&self, id: WaypointId) -> Option<&Waypoint> {
        self.index_of(id).map(|index| &self.waypoints[index])
    }

    pub fn first_waypoint(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }

    pub fn last_waypoint(&self) -> Option<&Waypoint> {
        self.waypoints.last()
    }

    /// Coordinates of the route for drawing. Empty unless there are at least
    /// two waypoints, all of them valid.
    pub fn geo_path(&self) -> Vec<Coordinate> {
        if self.waypoints.len() < 2 || self.waypoints.iter().any(|w| !w.is_valid()) {
            return Vec::new();
        }
        self.waypoints.iter().map(|w| *w.coordinate()).collect()
    }

    pub fn geo_line_string(&self) -> LineString<f64> {
        let points: Vec<Point<f64>> = self.geo_path().iter().map(Point::from).collect();
        LineString::from(points)
    }

    /// Waypoint, leg, waypoint, ... , waypoint.
    pub fn route_objects(&self) -> Vec<RouteObject<'_>> {
        let mut result = Vec::with_capacity(self.waypoints.len() + self.legs.len());
        for (i, waypoint) in self.waypoints.iter().enumerate() {
            result.push(RouteObject::Waypoint(self.ids[i], waypoint));
            if let Some(leg) = self.legs.get(i) {
                result.push(RouteObject::Leg(leg));
            }
        }
        result
    }

    pub fn total_distance(&self) -> Distance {
        self.legs
            .iter()
            .fold(Distance::from_m(0.0), |total, leg| total + leg.distance())
    }

    // Time and fuel, counted from the leg where the route passes SUMMARY_MIN_DISTANCE
    fn totals(&self) -> (Distance, Time, f64) {
        let mut distance = Distance::from_m(0.0);
        let mut time = Time::from_s(0.0);
        let mut fuel = 0.0;
        for leg in &self.legs {
            distance += leg.distance();
            if distance > SUMMARY_MIN_DISTANCE {
                time += leg.time();
                fuel += leg.fuel();
            }
        }
        (distance, time, fuel)
    }

    /// Totals of the route, e.g. "Total: 120.1 NM • 1:00 h • 30 L". Missing
    /// aircraft or wind data is listed on a second line. Empty without legs.
    pub fn summary(&self) -> String {
        if self.legs.is_empty() {
            return String::new();
        }
        let (distance, time, fuel) = self.totals();

        let mut result = format!("Total: {}", DistanceFormat::new("NM").format(&distance));
        if time.is_finite() {
            result.push_str(&format!(" • {} h", time.to_hours_and_minutes()));
        }
        if fuel.is_finite() {
            result.push_str(&format!(" • {} L", fuel.round() as i64));
        }

        let mut complaints: Vec<&str> = Vec::new();
        if let Some(aircraft) = self.aircraft.upgrade() {
            if !aircraft.get_cruise_speed().is_finite() {
                complaints.push("Cruise speed not specified.");
            }
            if !aircraft.get_fuel_consumption().is_finite() {
                complaints.push("Fuel consumption not specified.");
            }
        }
        if let Some(wind) = self.wind.upgrade() {
            if !wind.get_speed().is_finite() {
                complaints.push("Wind speed not specified.");
            }
            if !wind.get_direction().is_finite() {
                complaints.push("Wind direction not specified.");
            }
        }
        if !complaints.is_empty() {
            result.push_str(&format!("\nComputation incomplete. {}", complaints.join(" ")));
        }
        result
    }

    pub fn register_listener(&self, event_types: &[EventType]) -> Option<Receiver<Event>> {
        self.events.register_listener(event_types)
    }

    /// Picks up changes of aircraft or wind and passes them on as
    /// `Event::SummaryChanged`. Returns true if there were any.
    pub fn process_provider_events(&self) -> bool {
        let received: usize = self.provider_events.iter().map(drain).sum();
        if received > 0 {
            debug!("{} provider changes", received);
            self.events.notify_listeners(Event::SummaryChanged);
        }
        received > 0
    }
}
