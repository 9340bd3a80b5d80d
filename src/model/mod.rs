pub mod aircraft;
pub mod leg;
pub mod properties;
pub mod route;
pub mod waypoint;
pub mod wind;

#[cfg(test)]
pub(crate) mod test_utils;
