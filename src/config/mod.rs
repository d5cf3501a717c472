//! Configuration for osm-adapter

pub mod settings;

pub use settings::Settings;
