pub mod config;
pub mod info;
pub mod mix;
pub mod spectrum;
