//! Submitting simulation runs.

use formkit::FormData;
use log::info;
use serde::{Deserialize, Serialize};

use crate::client::Api;
use crate::error::Error;

/// Default path simulation runs are posted to.
pub const DEFAULT_SIMULATION_PATH: &str = "/simulation";

/// Parameters of a simulation run, as the backend expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Number of servers.
    pub nservers: u32,
    /// Capacity of each server.
    pub ncapacity: u32,
    /// Simulated runtime.
    pub runtime: u32,
}

impl From<&SimulationParams> for FormData {
    fn from(params: &SimulationParams) -> Self {
        [
            ("nservers", params.nservers.to_string()),
            ("ncapacity", params.ncapacity.to_string()),
            ("runtime", params.runtime.to_string()),
        ]
        .into_iter()
        .collect()
    }
}

/// Client for the simulation endpoint.
#[derive(Debug, Clone)]
pub struct Simulation {
    api: Api,
    path: String,
}

impl Simulation {
    pub fn new(api: &Api) -> Self {
        Self::with_path(api, DEFAULT_SIMULATION_PATH)
    }

    pub fn with_path(api: &Api, path: impl Into<String>) -> Self {
        Self {
            api: api.clone(),
            path: path.into(),
        }
    }

    /// Post `data` form-encoded and return the response body.
    ///
    /// Failures are returned as-is; there is no retry.
    pub async fn submit(&self, data: &FormData) -> Result<String, Error> {
        info!("starting simulation with {} parameter(s)", data.len());
        Ok(self.api.post_form(&self.path, data).await?)
    }

    pub async fn run(&self, params: &SimulationParams) -> Result<String, Error> {
        self.submit(&FormData::from(params)).await
    }
}
