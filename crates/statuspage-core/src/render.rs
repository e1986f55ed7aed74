use crate::config::PageConfig;
use crate::error::Result;
use crate::incident::Incident;
use crate::status::{Panel, System};
use minijinja::Environment;
use serde::Serialize;

pub const TEMPLATE_FILE: &str = "template.html";

/// Everything the page template can see.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageContext<'a> {
    pub systems: &'a [System],
    pub incidents: &'a [Incident],
    pub panels: &'a [Panel],
    pub config: &'a PageConfig,
}

/// Render `template` with `context`. Output is not autoescaped; the template
/// is content the repository owner controls.
pub fn render(template: &str, context: &PageContext<'_>) -> Result<String> {
    let env = Environment::new();
    Ok(env.render_str(template, context)?)
}
