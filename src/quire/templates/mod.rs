//! Templates for rendered output.
//!
//! Kept as stand-alone files and included here as string constants. The
//! `.html` template names turn on minijinja's HTML auto-escaping, so only
//! values explicitly marked safe reach the output unescaped.

use crate::error::Result;
use minijinja::Environment;
use serde::Serialize;

pub const DOCUMENT_TEMPLATE_NAME: &str = "document.html";
pub const DOCUMENT_TEMPLATE: &str = include_str!("document.html");

/// Render one of the built-in templates with `data`.
pub fn render<T: Serialize>(name: &str, data: T) -> Result<String> {
    let mut env = Environment::new();
    env.add_template(DOCUMENT_TEMPLATE_NAME, DOCUMENT_TEMPLATE)?;
    let tmpl = env.get_template(name)?;
    Ok(tmpl.render(data)?)
}
