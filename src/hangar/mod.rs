/*
 * Copyright (c) 2003-2023. Trevor Campbell and others.
 */
pub mod hangar;

pub use hangar::{AircraftProfile, Hangar};
