//! Factory for forms described by JSON templates on the backend.

use formkit::{Form, FormTemplate};
use log::{info, warn};
use webdom::{Document, NodeId};

use crate::client::Api;
use crate::error::Error;

/// Default path the backend serves form templates under.
pub const DEFAULT_TEMPLATES_PATH: &str = "/forms";

/// Builds [`Form`]s from templates served as `GET <templates>/<name>`.
///
/// # Example
///
/// ```ignore
/// let forms = Forms::new(&api);
/// let form = forms.create(&doc, main, "simulation.json").await?;
/// form.on(FormEventKind::Submit, |event| { /* ... */ });
/// ```
#[derive(Debug, Clone)]
pub struct Forms {
    templates: Api,
}

impl Forms {
    /// Serve templates from [`DEFAULT_TEMPLATES_PATH`] under `api`.
    pub fn new(api: &Api) -> Self {
        Self::with_path(api, DEFAULT_TEMPLATES_PATH)
    }

    pub fn with_path(api: &Api, templates_path: &str) -> Self {
        Self {
            templates: api.scoped(templates_path),
        }
    }

    /// Fetch and parse the template called `name`.
    pub async fn template(&self, name: &str) -> Result<FormTemplate, Error> {
        let template: FormTemplate = self.templates.get_json(name).await?;
        info!("template {name}: {} field(s)", template.fields.len());
        Ok(template)
    }

    /// Fetch the template called `name` and build an event-enabled form from
    /// it under `parent`.
    ///
    /// Nothing is attached when the fetch or parse fails, or when `parent`
    /// disappeared while the template was loading.
    pub async fn create(&self, document: &Document, parent: NodeId, name: &str) -> Result<Form, Error> {
        let template = self.template(name).await?;
        if !document.contains(parent) {
            warn!("parent {parent} removed while loading template {name}");
            return Err(Error::DetachedParent(parent));
        }
        Ok(Form::new(document, parent, template).with_events())
    }
}
