//! `formwork register`: fill in a form, submit it, print the field views.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use colored::Colorize;

use formwork_core::{load_definition, Field, Form, ThemeProvider};
use formwork_renderer::{Renderer, ViewKind};

use super::open_store;

/// Fill in and submit a form.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Value for the `username` field.
    #[arg(long)]
    pub username: Option<String>,

    /// Value for the `email` field.
    #[arg(long)]
    pub email: Option<String>,

    /// Value for the `password` field.
    #[arg(long)]
    pub password: Option<String>,

    /// Value for the `confirmPassword` field.
    #[arg(long)]
    pub confirm: Option<String>,

    /// Set any field by id; may be repeated. Applied after the named flags.
    #[arg(long = "field", value_name = "ID=VALUE", value_parser = parse_assignment)]
    pub fields: Vec<(String, String)>,

    /// YAML form definition to use instead of the built-in registration form.
    #[arg(long, value_name = "FILE")]
    pub form: Option<PathBuf>,

    /// Directory of `.tera` files overriding the embedded templates.
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Render the field views as HTML instead of plain text.
    #[arg(long)]
    pub html: bool,
}

impl RegisterArgs {
    pub fn run(self) -> Result<()> {
        let mut form = match &self.form {
            Some(path) => load_definition(path)
                .and_then(|def| def.build())
                .with_context(|| format!("invalid form definition '{}'", path.display()))?,
            None => Form::registration(),
        };

        for (id, value) in self.assignments() {
            form.set_value(&id, value)
                .with_context(|| format!("cannot set field '{id}'"))?;
        }

        let theme = ThemeProvider::load(open_store()?)
            .context("failed to read theme")?
            .theme();
        let renderer = match &self.templates {
            Some(dir) => Renderer::with_template_dir(dir),
            None => Renderer::new(),
        }
        .context("failed to load templates")?;
        let view = if self.html { ViewKind::Html } else { ViewKind::Text };

        match form.submit() {
            Ok(submission) => {
                println!("{} Submission accepted", "✓".green());
                for (id, value) in &submission.values {
                    let secret = form
                        .field(id.as_str())
                        .is_some_and(|c| c.descriptor().kind.is_secret());
                    if !secret {
                        println!("  {id}: {value}");
                    }
                }
                Ok(())
            }
            Err(failure) => {
                let rendered = renderer
                    .render(&form, theme, view)
                    .context("failed to render form")?;
                print!("{rendered}");
                let invalid = form.fields().filter(|c| !c.error().is_empty()).count();
                bail!("{failure}: {invalid} field(s) need attention")
            }
        }
    }

    /// Named flags first, then `--field` pairs, each in command-line order.
    fn assignments(&self) -> Vec<(String, String)> {
        let named = [
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
            ("confirmPassword", &self.confirm),
        ];
        named
            .into_iter()
            .filter_map(|(id, value)| value.clone().map(|v| (id.to_owned(), v)))
            .chain(self.fields.iter().cloned())
            .collect()
    }
}

fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected ID=VALUE, got '{raw}'"))?;
    if id.is_empty() {
        bail!("field id must not be empty in '{raw}'");
    }
    Ok((id.to_owned(), value.to_owned()))
}
