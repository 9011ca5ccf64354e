//! Tera rendering engine: [`ViewKind`] enum and [`Renderer`].
//!
//! | View | Template               | Escaping  |
//! |------|------------------------|-----------|
//! | Text | `form/form.txt.tera`   | none      |
//! | Html | `form/form.html.tera`  | autoescape|

use std::collections::HashMap;
use std::path::Path;

use tera::Tera;

use formwork_core::{Form, Theme};

use crate::context::FormContext;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates: baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("shared/_field.txt.tera", include_str!("templates/_partials/field.txt.tera")),
    ("shared/_field.html.tera", include_str!("templates/_partials/field.html.tera")),
    ("form/form.txt.tera", include_str!("templates/form.txt.tera")),
    ("form/form.html.tera", include_str!("templates/form.html.tera")),
];

const AUTOESCAPE_SUFFIXES: &[&str] = &[".html.tera", ".html"];

// ---------------------------------------------------------------------------
// User overrides
// ---------------------------------------------------------------------------

/// Lowercase, `/`-separated name relative to the override root.
fn template_name(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().to_lowercase())
        .collect::<Vec<_>>()
        .join("/")
}

fn io_err(path: &Path, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.to_path_buf(), source }
}

/// Every `.tera` file under `root` as `(name, contents)`. Other files are
/// never read. A missing `root` yields nothing.
fn read_overrides(root: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut overrides = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir).map_err(|e| io_err(&dir, e))? {
            let path = entry.map_err(|e| io_err(&dir, e))?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "tera") {
                let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
                overrides.push((template_name(root, &path), contents));
            }
        }
    }
    Ok(overrides)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = TPLS
        .iter()
        .map(|(name, body)| ((*name).to_owned(), (*body).to_owned()))
        .collect();
    if let Some(dir) = user_template_dir {
        let overrides = read_overrides(dir)?;
        tracing::debug!("{} template override(s) from {}", overrides.len(), dir.display());
        templates.extend(overrides);
    }

    let mut tera = Tera::default();
    tera.autoescape_on(AUTOESCAPE_SUFFIXES.to_vec());
    tera.add_raw_templates(templates)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// ViewKind
// ---------------------------------------------------------------------------

/// Output formats for a rendered form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewKind {
    #[default]
    Text,
    Html,
}

impl ViewKind {
    pub fn all() -> &'static [ViewKind] {
        &[ViewKind::Text, ViewKind::Html]
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            ViewKind::Text => "form/form.txt.tera",
            ViewKind::Html => "form/form.html.tera",
        }
    }
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for rendering templates with optional user overrides.
///
/// `user_template_dir` may contain `.tera` files that override embedded
/// defaults, e.g. `form/form.html.tera` or `shared/_field.html.tera`.
/// Override names are lowercase paths relative to the directory.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(TemplateEngine { tera })
    }

    /// Render `view` from a prepared context. Line endings are always LF.
    pub fn render(&self, ctx: &FormContext, view: ViewKind) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        let template = view.template_name();
        let content = self
            .tera
            .render(template, &tera_ctx)
            .map_err(|source| RenderError::Render { template, source })?;
        Ok(content.replace("\r\n", "\n"))
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Renderer over the embedded templates. Create once and reuse.
pub struct Renderer {
    engine: TemplateEngine,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        Ok(Renderer { engine: TemplateEngine::new(None)? })
    }

    /// Renderer whose templates may be overridden from `dir`.
    pub fn with_template_dir(dir: &Path) -> Result<Self, RenderError> {
        Ok(Renderer { engine: TemplateEngine::new(Some(dir))? })
    }

    /// Render the ordered field views of `form`.
    pub fn render(&self, form: &Form, theme: Theme, view: ViewKind) -> Result<String, RenderError> {
        let ctx = FormContext::from_form(form, theme);
        self.engine.render(&ctx, view)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
