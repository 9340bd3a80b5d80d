/*
 * Copyright (c) 2003-2023. Trevor Campbell and others.
 */

//! Geodesy for the route: coordinates, great circle distance and course.

pub mod coordinate;

pub use coordinate::Coordinate;
