//! Simulation web client library
//!
//! Fetches JSON form templates, turns them into live [`formkit::Form`]s and
//! submits collected form data to the simulation endpoint.

pub mod config;
pub mod error;
pub mod forms;
pub mod simulation;

mod client;

pub use client::*;
pub use config::Config;
pub use error::{ApiError, ConfigError, Error};
pub use forms::Forms;
pub use simulation::{Simulation, SimulationParams};
