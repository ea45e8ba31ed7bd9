//! Whole settings files: the `config = {...}` block plus surrounding code.

use super::error::SettingsParseError;
use super::model::Container;
use super::{parser, render};
use crate::base::FormatOptions;

const ANCHOR: &str = "config = {\n";

/// A settings file split into the verbatim text around the config dict and
/// the parsed dict itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SettingsDocument {
    prefix: String,
    config: Container,
    postfix: String,
}

impl SettingsDocument {
    pub fn new(prefix: impl Into<String>, config: Container, postfix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            config,
            postfix: postfix.into(),
        }
    }

    /// Parse a settings file.
    ///
    /// Everything before the `config = {` line is kept as prefix, everything
    /// after the first line starting with `}` as postfix.
    pub fn parse(text: &str) -> Result<Self, SettingsParseError> {
        let anchor = text.find(ANCHOR).ok_or(SettingsParseError::MissingAnchor)?;
        let body_start = anchor + ANCHOR.len();
        let close = if text[body_start..].starts_with('}') {
            body_start
        } else {
            text[body_start..]
                .find("\n}")
                .map(|offset| body_start + offset + 1)
                .ok_or(SettingsParseError::MissingClosingLine)?
        };

        let mut config = parser::parse_body(text, body_start, close)?;
        config.set_source_text(format!("{{\n{}}}", &text[body_start..close]));
        tracing::debug!(
            prefix_len = anchor,
            entries = config.len(),
            "parsed settings document"
        );

        Ok(Self {
            prefix: text[..anchor].to_string(),
            config,
            postfix: text[close + 1..].to_string(),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn postfix(&self) -> &str {
        &self.postfix
    }

    pub fn config(&self) -> &Container {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Container {
        &mut self.config
    }

    pub fn into_parts(self) -> (String, Container, String) {
        (self.prefix, self.config, self.postfix)
    }

    pub fn render(&self) -> String {
        self.render_with(&FormatOptions::default())
    }

    pub fn render_with(&self, options: &FormatOptions) -> String {
        let mut out = String::with_capacity(self.prefix.len() + self.postfix.len() + 64);
        out.push_str(&self.prefix);
        out.push_str("config = ");
        out.push_str(&render::render_container(&self.config, 0, options));
        out.push_str(&self.postfix);
        out
    }
}

impl std::fmt::Display for SettingsDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
