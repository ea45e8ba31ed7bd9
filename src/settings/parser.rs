//! Recursive-descent parser for settings documents.
//!
//! Works on the token stream of [`super::lexer`]; every value keeps the exact
//! text it was written with, every container remembers its source slice.

use super::error::SettingsParseError;
use super::lexer::{Token, TokenKind, tokenize};
use super::model::{Conditional, Container, ContainerKind, DictEntry, Item, ListEntry, Value};
use text_size::TextSize;

type ParseResult<T> = Result<T, SettingsParseError>;

/// Parse the body of a `config = {` block, i.e. the text between the anchor
/// line and the closing `}` line of `text`.
pub fn parse_body(text: &str, start: usize, end: usize) -> ParseResult<Container> {
    let mut parser = Parser::new(text, start, end);
    let container = parser.parse_items(ContainerKind::Dict, None, true)?;
    tracing::trace!(items = container.len(), "parsed settings body");
    Ok(container)
}

/// Parse a bare dict literal such as `{ "a" : 1 }`, allowing surrounding
/// whitespace and comments.
pub fn parse_dict_literal(text: &str) -> ParseResult<Container> {
    let mut parser = Parser::new(text, 0, text.len());
    parser.skip_trivia();
    let Some(token) = parser.peek() else {
        return Err(parser.error_at_end("expected `{`"));
    };
    if token.kind != TokenKind::LBrace {
        return Err(parser.error(token, "expected `{`"));
    }
    let Value::Container(container) = parser.parse_value(false)? else {
        return Err(parser.error_at_end("expected a dict literal"));
    };
    parser.skip_trivia();
    if let Some(token) = parser.peek() {
        return Err(parser.error(token, format!("unexpected {} after dict", token.kind.describe())));
    }
    Ok(container)
}

/// Recognize `### CHILD <n> ###`
pub fn child_placeholder_slot(comment: &str) -> Option<usize> {
    let inner = comment.trim().strip_prefix("###")?.strip_suffix("###")?;
    let number = inner.trim().strip_prefix("CHILD")?;
    if !number.starts_with(char::is_whitespace) {
        return None;
    }
    number.trim().parse().ok()
}

struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, start: usize, end: usize) -> Self {
        let tokens = tokenize(&text[start..end], TextSize::new(start as u32));
        Self {
            text,
            tokens,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn skip_trivia(&mut self) {
        while matches!(
            self.peek_kind(),
            Some(TokenKind::Newline | TokenKind::Comment)
        ) {
            self.pos += 1;
        }
    }

    fn slice(&self, start: TextSize, end: TextSize) -> &'a str {
        &self.text[usize::from(start)..usize::from(end)]
    }

    fn error(&self, token: Token<'_>, message: impl Into<String>) -> SettingsParseError {
        SettingsParseError::syntax(self.text, token.range.start(), message)
    }

    fn error_at_end(&self, message: impl Into<String>) -> SettingsParseError {
        let offset = self
            .tokens
            .last()
            .map_or(TextSize::new(0), |t| t.range.end());
        SettingsParseError::syntax(self.text, offset, message)
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token<'a>> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            Some(token) => Err(self.error(
                token,
                format!("expected {}, found {}", kind.describe(), token.kind.describe()),
            )),
            None => Err(self.error_at_end(format!(
                "expected {}, found end of input",
                kind.describe()
            ))),
        }
    }

    // ========================================================================
    // CONTAINERS
    // ========================================================================

    /// Parse items until `closer` (not consumed) or, without a closer, until
    /// the end of input.
    fn parse_items(
        &mut self,
        kind: ContainerKind,
        closer: Option<TokenKind>,
        after_line_break: bool,
    ) -> ParseResult<Container> {
        let mut container = Container::new(kind);
        // a comment on the same line as the last entry belongs to that entry
        let mut attach = false;
        let mut line_break = after_line_break;

        loop {
            let Some(token) = self.peek() else {
                if let Some(closer) = closer {
                    return Err(self.error_at_end(format!(
                        "unbalanced brackets: expected {} before end of input",
                        closer.describe()
                    )));
                }
                break;
            };

            match token.kind {
                TokenKind::Newline => {
                    self.bump();
                    if line_break {
                        container.push(Item::EmptyLine);
                    }
                    line_break = true;
                    attach = false;
                }
                TokenKind::Comment => {
                    self.bump();
                    Self::push_comment(&mut container, token.text, attach);
                    line_break = false;
                }
                TokenKind::Comma => {
                    self.bump();
                    attach = true;
                    line_break = false;
                }
                k if Some(k) == closer => break,
                k if k.is_closing() => {
                    return Err(self.error(
                        token,
                        format!("unbalanced brackets: unexpected {}", k.describe()),
                    ));
                }
                _ => {
                    self.parse_item(&mut container, closer)?;
                    if self.peek_kind() == Some(TokenKind::Comma) {
                        self.bump();
                    }
                    attach = true;
                    line_break = false;
                }
            }
        }

        Ok(container)
    }

    fn push_comment(container: &mut Container, text: &str, attach: bool) {
        if attach {
            if let Some(comments) = container
                .items_mut()
                .last_mut()
                .and_then(Item::comments_mut)
            {
                comments.push(text.to_string());
                return;
            }
        }
        match child_placeholder_slot(text) {
            Some(slot) => container.push(Item::ChildPlaceholder(slot)),
            None => container.push(Item::Comment(text.to_string())),
        }
    }

    fn parse_item(&mut self, container: &mut Container, closer: Option<TokenKind>) -> ParseResult<()> {
        match container.kind() {
            ContainerKind::Dict => {
                let key = self.parse_key()?;
                self.expect(TokenKind::Colon)?;
                let value = self.parse_value(false)?;
                container.push(Item::DictEntry(DictEntry::new(key, value)));
            }
            ContainerKind::List => {
                let value = self.parse_value(true)?;
                container.push(Item::ListEntry(ListEntry::new(value)));
                if self.peek_kind() == Some(TokenKind::ForKw) {
                    let comprehension = self.parse_comprehension(closer)?;
                    container.set_comprehension(Some(comprehension));
                }
            }
        }
        Ok(())
    }

    /// Key text up to the `:` at bracket depth zero. Two operands in a row
    /// at depth zero end the key.
    fn parse_key(&mut self) -> ParseResult<String> {
        let Some(first) = self.peek() else {
            return Err(self.error_at_end("expected a key"));
        };
        let mut end = first.range.end();
        let mut depth = 0usize;
        let mut operand_done = false;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Colon if depth == 0 => break,
                k if k.is_opening() => depth += 1,
                k if k.is_closing() && depth > 0 => {
                    depth -= 1;
                    operand_done = depth == 0;
                }
                TokenKind::Newline | TokenKind::Comment | TokenKind::Comma if depth == 0 => {
                    return Err(self.error(token, "expected `:` after key"));
                }
                k if k.is_closing() => {
                    return Err(self.error(token, "expected `:` after key"));
                }
                TokenKind::String | TokenKind::Number | TokenKind::Name if depth == 0 => {
                    if operand_done {
                        return Err(self.error(token, "expected `:` after key"));
                    }
                    operand_done = true;
                }
                TokenKind::Operator | TokenKind::IfKw | TokenKind::ElseKw if depth == 0 => {
                    operand_done = false;
                }
                _ => {}
            }
            end = token.range.end();
            self.bump();
        }
        if self.peek().is_none() {
            return Err(self.error_at_end("expected `:` after key"));
        }
        Ok(self.slice(first.range.start(), end).to_string())
    }

    /// `for ...` up to the list's closing bracket
    fn parse_comprehension(&mut self, closer: Option<TokenKind>) -> ParseResult<String> {
        let Some(first) = self.peek() else {
            return Err(self.error_at_end("expected a comprehension"));
        };
        let mut end = first.range.end();
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            match token.kind {
                k if Some(k) == closer && depth == 0 => break,
                k if k.is_opening() => depth += 1,
                k if k.is_closing() => {
                    if depth == 0 {
                        return Err(self.error(token, "unbalanced brackets in comprehension"));
                    }
                    depth -= 1;
                }
                _ => {}
            }
            end = token.range.end();
            self.bump();
        }
        Ok(self.slice(first.range.start(), end).trim_end().to_string())
    }

    // ========================================================================
    // VALUES
    // ========================================================================

    fn parse_value(&mut self, in_list: bool) -> ParseResult<Value> {
        while self.peek_kind() == Some(TokenKind::Newline) {
            self.bump();
        }
        let Some(token) = self.peek() else {
            return Err(self.error_at_end("expected a value"));
        };

        let primary = match token.kind {
            TokenKind::LBrace => self.parse_container(ContainerKind::Dict, TokenKind::RBrace)?,
            TokenKind::LBracket => {
                self.parse_container(ContainerKind::List, TokenKind::RBracket)?
            }
            _ => self.parse_literal(in_list)?,
        };

        if self.peek_kind() != Some(TokenKind::IfKw) {
            return Ok(primary);
        }
        self.bump();
        let condition = self.parse_condition()?;
        self.expect(TokenKind::ElseKw)?;
        let else_value = self.parse_value(in_list)?;
        Ok(Value::Conditional(Box::new(Conditional {
            if_value: primary,
            condition,
            else_value,
        })))
    }

    fn parse_container(&mut self, kind: ContainerKind, closer: TokenKind) -> ParseResult<Value> {
        let Some(open) = self.bump() else {
            return Err(self.error_at_end("expected a container"));
        };
        let mut container = self.parse_items(kind, Some(closer), false)?;
        let close = self.expect(closer)?;
        container.set_source_text(self.slice(open.range.start(), close.range.end()).to_string());
        Ok(Value::Container(container))
    }

    /// Opaque literal text up to `,`, a line break or the enclosing closer
    fn parse_literal(&mut self, in_list: bool) -> ParseResult<Value> {
        let Some(first) = self.peek() else {
            return Err(self.error_at_end("expected a value"));
        };
        let mut end = first.range.start();
        let mut depth = 0usize;

        while let Some(token) = self.peek() {
            if depth == 0 {
                match token.kind {
                    TokenKind::Comma
                    | TokenKind::Newline
                    | TokenKind::Comment
                    | TokenKind::IfKw
                    | TokenKind::ElseKw => break,
                    TokenKind::ForKw if in_list => break,
                    k if k.is_closing() => break,
                    _ => {}
                }
            }
            if token.kind.is_opening() {
                depth += 1;
            } else if token.kind.is_closing() {
                depth -= 1;
            }
            end = token.range.end();
            self.bump();
        }

        if depth > 0 {
            return Err(self.error_at_end("unbalanced brackets in value"));
        }
        if end == first.range.start() {
            return Err(self.error(first, format!("expected a value, found {}", first.kind.describe())));
        }
        Ok(Value::Literal(self.slice(first.range.start(), end).to_string()))
    }

    /// Condition text between `if` and `else`
    fn parse_condition(&mut self) -> ParseResult<String> {
        let Some(first) = self.peek() else {
            return Err(self.error_at_end("expected a condition"));
        };
        let mut end = first.range.start();
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            if depth == 0 {
                match token.kind {
                    TokenKind::ElseKw => break,
                    TokenKind::Comma | TokenKind::Newline | TokenKind::Comment => {
                        return Err(self.error(token, "expected `else` in conditional value"));
                    }
                    k if k.is_closing() => {
                        return Err(self.error(token, "expected `else` in conditional value"));
                    }
                    _ => {}
                }
            }
            if token.kind.is_opening() {
                depth += 1;
            } else if token.kind.is_closing() {
                depth -= 1;
            }
            end = token.range.end();
            self.bump();
        }
        if end == first.range.start() {
            return Err(self.error(first, "expected a condition"));
        }
        Ok(self.slice(first.range.start(), end).to_string())
    }
}
