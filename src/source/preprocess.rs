//! Text passes that reduce a program source to its template expression.
//!
//! Comments survive as inline regions between [`COMMENT_START`] and
//! [`COMMENT_END`], so the bracket parser can attach them to nodes after all
//! whitespace has been collapsed.

use super::SourceParseError;
use regex::{Captures, Regex};
use std::sync::LazyLock;

pub const COMMENT_START: char = '\u{E000}';
pub const COMMENT_END: char = '\u{E001}';

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*(.*?)\*/").unwrap());

static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)//(.*)$").unwrap());

static DEBUG_LOG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^.*LOG\(DEBUG\)\s*<<.*(\n|$)").unwrap());

static TYPEDEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\btypedef\s+([^;]*?)\s*\b([A-Za-z_][A-Za-z0-9_]*)\s*;").unwrap()
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static SETTINGS_CONSTRUCTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"settings\s*\(\s*argc\s*,\s*argv\s*\)\s*;").unwrap());

static PROBLEM_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*\s*\(\s*settings\s*\)\s*;").unwrap());

/// Run every pass and return the bare template expression
pub fn template_expression(source: &str) -> Result<String, SourceParseError> {
    let text = mark_comments(source);
    let text = DEBUG_LOG.replace_all(&text, "");
    let text = inline_typedefs(&text);
    let text = WHITESPACE.replace_all(&text, " ");
    let expression = isolate(&text)?;
    tracing::debug!(expression = %expression, "isolated template expression");
    Ok(expression.to_string())
}

/// Rewrite `/* .. */` and `// ..` comments into sentinel regions
pub fn mark_comments(source: &str) -> String {
    let wrap = |caps: &Captures<'_>| format!("{COMMENT_START}{}{COMMENT_END}", &caps[1]);
    let text = BLOCK_COMMENT.replace_all(source, wrap);
    LINE_COMMENT.replace_all(&text, wrap).into_owned()
}

/// Remove `typedef <type> <alias>;` statements and substitute every alias by
/// its type. Later typedefs are substituted first, so an alias defined in
/// terms of an earlier one resolves completely.
pub fn inline_typedefs(text: &str) -> String {
    let typedefs: Vec<(String, String)> = TYPEDEF
        .captures_iter(text)
        .map(|caps| {
            let ty = WHITESPACE.replace_all(caps[1].trim(), " ").into_owned();
            (caps[2].to_string(), ty)
        })
        .collect();

    let mut text = TYPEDEF.replace_all(text, "").into_owned();
    for (alias, ty) in typedefs.iter().rev() {
        tracing::trace!(alias = %alias, ty = %ty, "inlining typedef");
        text = replace_identifier(&text, alias, ty);
    }
    text
}

/// Replace whole-identifier occurrences of `ident`
pub fn replace_identifier(text: &str, ident: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (start, _) in text.match_indices(ident) {
        let end = start + ident.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        let bounded = before.is_none_or(|c| !unicode_ident::is_xid_continue(c))
            && after.is_none_or(|c| !unicode_ident::is_xid_continue(c));
        if bounded {
            out.push_str(&text[last..start]);
            out.push_str(replacement);
            last = end;
        }
    }
    out.push_str(&text[last..]);
    out
}

/// The text between the settings constructor and the problem declaration
fn isolate(text: &str) -> Result<&str, SourceParseError> {
    let constructor = SETTINGS_CONSTRUCTOR
        .find(text)
        .ok_or(SourceParseError::MissingSettingsConstructor)?;
    let rest = &text[constructor.end()..];
    let declaration = PROBLEM_DECLARATION
        .find(rest)
        .ok_or(SourceParseError::MissingProblemDeclaration)?;
    Ok(rest[..declaration.start()].trim())
}
