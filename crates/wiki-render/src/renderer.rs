//! `minijinja`-backed renderer.

use std::path::Path;

use minijinja::{Environment, context};
use wiki_page::Page;

use crate::{Render, RenderError, Template};

const VIEW_TEMPLATE: &str = include_str!("../templates/view.html");
const EDIT_TEMPLATE: &str = include_str!("../templates/edit.html");

/// Renderer holding a compiled template environment.
///
/// Built once at startup; rendering takes `&self` only.
#[derive(Debug)]
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Create a renderer with the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if a built-in template fails to compile.
    pub fn embedded() -> Result<Self, RenderError> {
        Self::from_sources(VIEW_TEMPLATE, EDIT_TEMPLATE)
    }

    /// Create a renderer from template sources.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if a template has a syntax error.
    pub fn from_sources(
        view: impl Into<String>,
        edit: impl Into<String>,
    ) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template_owned(Template::View.file_name(), view.into())?;
        env.add_template_owned(Template::Edit.file_name(), edit.into())?;

        tracing::debug!(
            templates = ?Template::ALL.map(Template::file_name),
            "Templates loaded"
        );
        Ok(Self { env })
    }

    /// Load `view.html` and `edit.html` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] if either file can't be read, or
    /// [`RenderError::Template`] if one fails to compile.
    pub fn from_dir(dir: &Path) -> Result<Self, RenderError> {
        let read = |template: Template| {
            let path = dir.join(template.file_name());
            std::fs::read_to_string(&path).map_err(|source| RenderError::Io { path, source })
        };

        let view = read(Template::View)?;
        let edit = read(Template::Edit)?;
        tracing::info!(dir = %dir.display(), "Templates read from directory");
        Self::from_sources(view, edit)
    }
}

impl Render for TemplateRenderer {
    fn render(&self, template: Template, page: &Page) -> Result<String, RenderError> {
        let body = page.body_text();
        let html = self
            .env
            .get_template(template.file_name())?
            .render(context! {
                title => page.title.as_str(),
                body => &*body,
            })?;

        tracing::debug!(title = %page.title, template = template.file_name(), "Page rendered");
        Ok(html)
    }
}
