use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

/// Bytes escaped in substituted values: everything except alphanumerics and `-_.!~*'()`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Failure while parsing or rendering a URL template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// `:` or `*` was not followed by a parameter name.
    #[error("Missing parameter name at index {index} in `{template}`")]
    MissingName { template: String, index: usize },

    /// Template ends with a lone `\`.
    #[error("Unterminated escape at the end of `{template}`")]
    DanglingEscape { template: String },

    /// A required parameter had no value.
    #[error("Expected \"{name}\" to be provided")]
    MissingParam { name: String },

    /// A parameter value rendered to an empty segment.
    #[error("Expected \"{name}\" to be a non-empty string")]
    EmptyParam { name: String },
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text copied verbatim
    Literal(String),
    /// `:name` or `:name?`
    Param { name: String, optional: bool },
    /// `*name`
    Wildcard { name: String },
}

/// A parsed URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
    tokens: Vec<Token>,
    encode: bool,
}

/// Parse `template`, optionally percent-encoding values on render.
///
/// Shorthand for [`PathTemplate::parse`] followed by [`PathTemplate::with_encoding`].
pub fn compile(template: &str, encode: bool) -> Result<PathTemplate, TemplateError> {
    Ok(PathTemplate::parse(template)?.with_encoding(encode))
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl PathTemplate {
    /// Tokenize a template. Values are percent-encoded on render by default.
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = template.char_indices().peekable();

        while let Some((index, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, escaped)) => literal.push(escaped),
                    None => {
                        return Err(TemplateError::DanglingEscape {
                            template: template.to_string(),
                        })
                    }
                },
                ':' | '*' => {
                    let mut name = String::new();
                    while let Some(&(_, next)) = chars.peek() {
                        if !is_name_char(next) {
                            break;
                        }
                        name.push(next);
                        chars.next();
                    }
                    if name.is_empty() {
                        return Err(TemplateError::MissingName {
                            template: template.to_string(),
                            index,
                        });
                    }
                    if !literal.is_empty() {
                        tokens.push(Token::Literal(std::mem::take(&mut literal)));
                    }
                    if c == '*' {
                        tokens.push(Token::Wildcard { name });
                    } else {
                        let optional = matches!(chars.peek(), Some(&(_, '?')));
                        if optional {
                            chars.next();
                        }
                        tokens.push(Token::Param { name, optional });
                    }
                }
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(Self {
            source: template.to_string(),
            tokens,
            encode: true,
        })
    }

    /// A template that is all literal text, with no parameter syntax interpreted.
    #[must_use]
    pub fn literal(text: &str) -> Self {
        let tokens = if text.is_empty() {
            Vec::new()
        } else {
            vec![Token::Literal(text.to_string())]
        };
        Self {
            source: text.to_string(),
            tokens,
            encode: true,
        }
    }

    /// Toggle percent-encoding of substituted values.
    #[must_use]
    pub fn with_encoding(mut self, encode: bool) -> Self {
        self.encode = encode;
        self
    }

    /// The template text this was parsed from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Names of all parameters in template order.
    #[must_use]
    pub fn param_names(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter_map(|t| match t {
                Token::Param { name, .. } | Token::Wildcard { name } => Some(name.as_str()),
                Token::Literal(_) => None,
            })
            .collect()
    }

    fn encode<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if self.encode {
            utf8_percent_encode(value, COMPONENT).into()
        } else {
            Cow::Borrowed(value)
        }
    }

    /// Substitute `params` into the template.
    ///
    /// Lookup uses "last write wins" when a name is repeated in `params`. Parameters
    /// the template does not mention are ignored.
    pub fn render(&self, params: &[(&str, &str)]) -> Result<String, TemplateError> {
        let lookup = |name: &str| {
            params
                .iter()
                .rfind(|(k, _)| *k == name)
                .map(|(_, v)| *v)
        };

        let mut out = String::with_capacity(self.source.len() + 16);
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Param { name, optional } => match lookup(name) {
                    Some("") => {
                        return Err(TemplateError::EmptyParam { name: name.clone() });
                    }
                    Some(value) => out.push_str(&self.encode(value)),
                    None if *optional => {
                        if out.ends_with('/') {
                            out.pop();
                        }
                    }
                    None => {
                        return Err(TemplateError::MissingParam { name: name.clone() });
                    }
                },
                Token::Wildcard { name } => {
                    let value = lookup(name)
                        .ok_or_else(|| TemplateError::MissingParam { name: name.clone() })?;
                    if value.is_empty() {
                        return Err(TemplateError::EmptyParam { name: name.clone() });
                    }
                    let segments: Vec<Cow<'_, str>> =
                        value.split('/').map(|s| self.encode(s)).collect();
                    out.push_str(&segments.join("/"));
                }
            }
        }
        if out.is_empty() {
            out.push('/');
        }
        Ok(out)
    }
}
