//! A trivia question bank served as a JSON API.

pub mod configuration;
pub mod db;
pub mod quiz;
pub mod server;
pub mod telemetry;
