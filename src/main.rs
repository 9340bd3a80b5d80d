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

use std::fs;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use log::{info, LevelFilter};

use kelpie_flight_route::hangar::Hangar;
use kelpie_flight_route::preference::{self, PreferenceManager, AIRCRAFT_NAME, UNITS};
use kelpie_flight_route::util::info::{ABOUT, PROGRAM_NAME, VERSION};
use kelpie_flight_route::util::lat_long_format::LatLongFormat;
use kelpie_flight_route::util::speed_format::SpeedFormat;
use kelpie_flight_route::units::Speed;
use kelpie_flight_route::util::Logger;
use kelpie_flight_route::{Aircraft, Coordinate, Route, RouteObject, RouteStore, Waypoint, Wind};

const UNKNOWN: &str = "-";

#[derive(Parser)]
#[command(name = "kelpie-route", version = VERSION, about = ABOUT, long_about = None)]
struct Args {
    /// Route file to use instead of the stored one
    #[arg(long)]
    route: Option<PathBuf>,

    /// Aircraft from the hangar to plan with
    #[arg(long)]
    aircraft: Option<String>,

    /// Log debug output to the terminal
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print waypoints, legs and the route summary
    Show,
    /// Append a waypoint at a position, e.g. 48.0225 7.8325 or "48 01 21N" "7 49 57E"
    Append {
        #[arg(allow_hyphen_values = true)]
        latitude: String,
        #[arg(allow_hyphen_values = true)]
        longitude: String,
    },
    /// Append the waypoint described by a GeoJSON point feature file
    AppendFeature { file: PathBuf },
    /// Remove the waypoint at a position, counting from 1
    Remove { position: usize },
    /// Move the waypoint at a position one place towards the start
    Up { position: usize },
    /// Move the waypoint at a position one place towards the end
    Down { position: usize },
    /// Remove all waypoints
    Clear,
    /// Reverse the route
    Reverse,
    /// Set the wind at cruise altitude
    Wind {
        /// Wind speed in knots
        #[arg(long)]
        speed: Option<f64>,
        /// Direction the wind comes from, in degrees
        #[arg(long)]
        direction: Option<f64>,
    },
    /// List the aircraft in the hangar
    Hangar,
}

fn main() {
    let args = Args::parse();
    let _logger = Logger::new(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
    info!("{} {} starting", PROGRAM_NAME, VERSION);

    let prefs = preference::manager();
    let hangar = Hangar::load();

    let aircraft = Rc::new(select_aircraft(&hangar, prefs, args.aircraft.as_deref()));
    let wind = Rc::new(Wind::from_preferences(prefs));
    let store = match &args.route {
        Some(path) => RouteStore::at(path),
        None => RouteStore::default_location(prefs),
    };
    let mut route = Route::new(Rc::downgrade(&aircraft), Rc::downgrade(&wind), store);

    match args.command.unwrap_or(Command::Show) {
        Command::Show => {}
        Command::Append {
            latitude,
            longitude,
        } => {
            let coordinate = parse_position(&latitude, &longitude).unwrap_or_else(|e| fail(&e));
            if route.append_coordinate(coordinate).is_none() {
                fail("Position is not a valid coordinate");
            }
        }
        Command::AppendFeature { file } => {
            let text = fs::read_to_string(&file)
                .unwrap_or_else(|e| fail(&format!("Unable to read {:?}: {}", file, e)));
            if route.append(&Waypoint::from_geojson_str(&text)).is_none() {
                fail("File does not describe a valid waypoint");
            }
        }
        Command::Remove { position } => {
            if route.remove_at(index_of(&route, position)).is_none() {
                fail("No such waypoint");
            }
        }
        Command::Up { position } => {
            let id = route.id_at(index_of(&route, position)).unwrap_or_else(|| fail("No such waypoint"));
            route.move_up(id);
        }
        Command::Down { position } => {
            let id = route.id_at(index_of(&route, position)).unwrap_or_else(|| fail("No such waypoint"));
            route.move_down(id);
        }
        Command::Clear => route.clear(),
        Command::Reverse => route.reverse(),
        Command::Wind { speed, direction } => {
            if let Some(speed) = speed {
                wind.set_speed_kt(speed);
            }
            if let Some(direction) = direction {
                wind.set_direction_deg(direction);
            }
            wind.save(prefs);
            route.process_provider_events();
        }
        Command::Hangar => {
            for profile in hangar.get_all() {
                let marker = if profile.name == aircraft.get_name() { "*" } else { " " };
                println!(
                    "{} {} ({} kt, {} L/h)",
                    marker, profile.name, profile.cruise_speed_kt, profile.fuel_consumption_lph
                );
            }
            return;
        }
    }

    print_route(&route, &aircraft, &wind, prefs);
}

fn select_aircraft(hangar: &Hangar, prefs: &PreferenceManager, requested: Option<&str>) -> Aircraft {
    if let Some(name) = requested {
        match hangar.get(name) {
            Some(profile) => {
                prefs.put(AIRCRAFT_NAME, name);
                return profile.to_aircraft();
            }
            None => fail(&format!("No aircraft named '{}' in the hangar", name)),
        }
    }
    prefs
        .get::<String>(AIRCRAFT_NAME)
        .and_then(|name| hangar.get(&name))
        .or_else(|| hangar.get_default_aircraft())
        .map(|profile| profile.to_aircraft())
        .unwrap_or_default()
}

// Decimal degrees, or degrees minutes seconds with a hemisphere letter
fn parse_position(latitude: &str, longitude: &str) -> Result<Coordinate, String> {
    let lat = parse_angle(latitude, LatLongFormat::lat_format())?;
    let lon = parse_angle(longitude, LatLongFormat::long_format())?;
    Ok(Coordinate::new(lat, lon))
}

fn parse_angle(text: &str, format: LatLongFormat) -> Result<f64, String> {
    if let Ok(value) = text.trim().parse::<f64>() {
        return Ok(value);
    }
    format
        .parse(text)
        .map_err(|e| format!("{}: '{}'", e, text))
}

fn index_of(route: &Route, position: usize) -> usize {
    if position == 0 || position > route.len() {
        fail("No such waypoint");
    }
    position - 1
}

fn print_route(route: &Route, aircraft: &Aircraft, wind: &Wind, prefs: &PreferenceManager) {
    let units = prefs.get::<String>(UNITS).unwrap_or_else(|| "NM".to_string());
    let speed_format = SpeedFormat::new(&units);
    println!("{}", aircraft_line(aircraft, &speed_format));
    println!("{}", wind_line(wind, &speed_format));
    println!();

    let mut position = 0;
    for object in route.route_objects() {
        match object {
            RouteObject::Waypoint(_, waypoint) => {
                position += 1;
                let coordinate = waypoint.coordinate();
                let name = waypoint.extended_name();
                println!(
                    "{:>3}. {} {}  {}",
                    position,
                    coordinate.get_latitude_as_string(),
                    coordinate.get_longitude_as_string(),
                    name
                );
                for line in waypoint.tabular_description() {
                    println!("       {}", line);
                }
            }
            RouteObject::Leg(leg) => println!("       | {}", leg.description()),
        }
    }
    if route.is_empty() {
        println!("Route is empty");
    } else {
        println!();
        println!("{}", route.summary());
    }
}

fn known_speed(speed: Speed, speed_format: &SpeedFormat) -> String {
    if speed.is_finite() {
        speed_format.format(&speed)
    } else {
        UNKNOWN.to_string()
    }
}

fn known_number(value: f64, unit: &str) -> String {
    if value.is_finite() {
        format!("{:.0}{}", value, unit)
    } else {
        UNKNOWN.to_string()
    }
}

fn aircraft_line(aircraft: &Aircraft, speed_format: &SpeedFormat) -> String {
    format!(
        "Aircraft: {}, cruise {}, {}",
        aircraft.get_name(),
        known_speed(aircraft.get_cruise_speed(), speed_format),
        known_number(aircraft.get_fuel_consumption(), " L/h")
    )
}

fn wind_line(wind: &Wind, speed_format: &SpeedFormat) -> String {
    format!(
        "Wind: {} from {}",
        known_speed(wind.get_speed(), speed_format),
        known_number(wind.get_direction_deg(), "°")
    )
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}
