pub mod config;
pub mod zone_occupancy;
