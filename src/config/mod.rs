//! Configuration management module
//!
//! Responsible for loading run settings from environment variables and `.env` files

pub mod settings;

pub use settings::Settings;
