//! Template renderer and rendering functionality for ghostwriter.
//! Substitutes configuration references into template text with MiniJinja.
//! References may be written with a leading dot (`{{ .db.port }}`) or
//! without one (`{{ db.port }}`). Only `{{` opens a tag: blocks are written
//! `{{% if x %}}...{{% endif %}}` and comments `{{/* ... */}}`, so `{%` and
//! `{#` in ordinary text stay literal.
use crate::config::ConfigTree;
use crate::error::{Error, Result};
use minijinja::syntax::SyntaxConfig;
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};
use regex::Regex;
use std::sync::LazyLock;

/// Start of an expression tag followed by a leading-dot field reference.
static DOT_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\{\{-?\s*)\.([A-Za-z_])").expect("dot reference pattern is valid")
});

/// A dotted field path at the start of an expression tag.
static FIELD_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{-?\s*([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z0-9_]+)*)")
        .expect("field reference pattern is valid")
});

/// Delimiters of statement blocks.
pub const BLOCK_DELIMITERS: (&str, &str) = ("{{%", "%}}");

/// Delimiters of comments.
pub const COMMENT_DELIMITERS: (&str, &str) = ("{{/*", "*/}}");

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string against the configuration.
    ///
    /// # Arguments
    /// * `template` - Template text to render
    /// * `config` - Configuration providing the referenced values
    /// * `path` - Relative path of the template, used in diagnostics only
    ///
    /// # Returns
    /// * `Result<String>` - Rendered text
    fn render(&self, template: &str, config: &ConfigTree, path: &str) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer that fails on undefined references and leaves
    /// text outside of tags untouched.
    pub fn new() -> Self {
        let syntax = SyntaxConfig::builder()
            .block_delimiters(BLOCK_DELIMITERS.0, BLOCK_DELIMITERS.1)
            .variable_delimiters("{{", "}}")
            .comment_delimiters(COMMENT_DELIMITERS.0, COMMENT_DELIMITERS.1)
            .build()
            .expect("template delimiters are valid");

        let mut env = Environment::new();
        env.set_syntax(syntax);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::TemplateSyntaxError` if the template does not compile
    /// * `Error::RenderError` if evaluation fails, e.g. on an undefined
    ///   reference; the first unresolved reference is named when it can be
    ///   found
    fn render(&self, template: &str, config: &ConfigTree, path: &str) -> Result<String> {
        let normalized = normalize_references(template);

        let env = self.env.clone();
        let tmpl = env
            .template_from_named_str(path, &normalized)
            .map_err(|source| Error::TemplateSyntaxError {
                path: path.to_string(),
                source,
            })?;

        tmpl.render(config).map_err(|source| {
            let reference = if source.kind() == ErrorKind::UndefinedError {
                first_unresolved_reference(&normalized, config)
            } else {
                None
            };
            Error::RenderError {
                path: path.to_string(),
                reference,
                source,
            }
        })
    }
}

/// Drops the leading dot of field references so `{{ .a.b }}` compiles as
/// `{{ a.b }}`.
pub fn normalize_references(template: &str) -> String {
    DOT_REFERENCE.replace_all(template, "${1}${2}").into_owned()
}

/// First field path at the start of an expression tag that does not exist
/// in `config`.
pub fn first_unresolved_reference(template: &str, config: &ConfigTree) -> Option<String> {
    FIELD_REFERENCE
        .captures_iter(template)
        .map(|captures| captures[1].to_string())
        .find(|reference| config.lookup(reference).is_not_found())
}
