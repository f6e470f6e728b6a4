//! Minimal `{key}` template renderer for generated scripts. Every key
//! a template references must be supplied by the caller; the set of
//! allowed keys is part of each template's contract. `{{` and `}}`
//! escape literal braces.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

#[derive(Debug, PartialEq, Eq)]
pub enum TemplateError {
    MissingKey(String),
    UnclosedKey,
}

impl Display for TemplateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::MissingKey(key) => write!(f, "no value for template key `{key}`"),
            TemplateError::UnclosedKey => write!(f, "unclosed template key"),
        }
    }
}

impl Error for TemplateError {}

pub fn render(template: &str, vars: &[(&str, &str)]) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut key = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(kc) => key.push(kc),
                        None => return Err(TemplateError::UnclosedKey),
                    }
                }
                match vars.iter().find(|(k, _)| *k == key) {
                    Some((_, v)) => out.push_str(v),
                    None => return Err(TemplateError::MissingKey(key)),
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
                out.push('}');
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}
