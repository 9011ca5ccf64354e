//! Rendering errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Templates failed to parse while the engine was being built.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// A parsed template failed against a form context, e.g. an override
    /// that reads a variable the context does not carry.
    #[error("failed to render '{template}': {source}")]
    Render {
        template: &'static str,
        #[source]
        source: tera::Error,
    },

    /// Reading a user override directory failed.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}
