use serde::{Deserialize, Serialize};

use super::InputConfig;

/// JSON description of a form.
///
/// ```json
/// { "fields": [ { "name": "runtime", "type": "number" } ] }
/// ```
///
/// A template without `fields` describes an empty form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormTemplate {
    #[serde(default)]
    pub fields: Vec<InputConfig>,
}

impl FormTemplate {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
