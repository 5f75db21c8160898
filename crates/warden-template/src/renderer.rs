//! A Handlebars registry with the authorization helpers pre-registered.

use std::sync::Arc;

use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, warn};

use warden_contracts::error::{WardenError, WardenResult};
use warden_core::traits::SubjectLookup;

use crate::{expressions::ExpressionFunctions, helpers::register_helpers};

/// Renders templates that call the authorization functions.
///
/// Strict mode is on: a template referring to a missing variable fails
/// instead of silently rendering an empty string.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new<L: SubjectLookup + 'static>(functions: Arc<ExpressionFunctions<L>>) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        register_helpers(&mut handlebars, functions);
        Self { handlebars }
    }

    /// Register a named template.
    ///
    /// Returns `WardenError::TemplateError` if the template does not parse.
    pub fn register_template(&mut self, name: &str, template: &str) -> WardenResult<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| WardenError::TemplateError {
                reason: format!("failed to register template '{}': {}", name, e),
            })?;
        debug!(template = %name, "template registered");
        Ok(())
    }

    /// Render the template registered as `name` with `data`.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> WardenResult<String> {
        self.handlebars.render(name, data).map_err(|e| {
            warn!(template = %name, error = %e, "template render failed");
            WardenError::TemplateError {
                reason: format!("failed to render template '{}': {}", name, e),
            }
        })
    }

    /// Render an unregistered template string with `data`.
    pub fn render_str<T: Serialize>(&self, template: &str, data: &T) -> WardenResult<String> {
        self.handlebars.render_template(template, data).map_err(|e| {
            warn!(error = %e, "inline template render failed");
            WardenError::TemplateError {
                reason: format!("failed to render template: {}", e),
            }
        })
    }
}
