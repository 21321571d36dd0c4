pub mod config;
pub mod platform;
pub mod player;
pub mod probe;
pub mod station;
pub mod stations;
