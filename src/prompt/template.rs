//! `{variable}` substitution for prompt templates.
//!
//! # Syntax
//!
//! - `{name}` - Substitutes the value of variable `name`
//! - `{{` - Renders as literal `{`
//! - `}}` - Renders as literal `}`
//!
//! Substituted values are inserted verbatim: braces inside a user's topic are
//! never parsed as placeholders. Undefined variables are an error rather than
//! an empty substitution.

use std::collections::HashMap;
use thiserror::Error;

/// Error type for template parsing and rendering failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A variable was referenced but not provided.
    #[error("undefined variable '{name}' at position {position} in template")]
    UndefinedVariable { name: String, position: usize },

    /// A `{` was found without a matching `}`.
    #[error("unmatched '{{' at position {position} in template")]
    UnmatchedBrace { position: usize },

    /// An empty placeholder such as `{}`.
    #[error("empty variable name '{{}}' at position {position} in template")]
    EmptyVariableName { position: usize },
}

/// One parsed piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Literal(char),
    Variable { name: &'a str, position: usize },
}

/// Split a template into literal characters and placeholders.
fn parse(template: &str) -> Result<Vec<Segment<'_>>, TemplateError> {
    let mut segments = Vec::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                if let Some((_, '{')) = chars.peek() {
                    chars.next();
                    segments.push(Segment::Literal('{'));
                    continue;
                }

                let name_start = pos + 1;
                let name_end = loop {
                    match chars.next() {
                        Some((end, '}')) => break end,
                        Some(_) => {}
                        None => return Err(TemplateError::UnmatchedBrace { position: pos }),
                    }
                };

                let name = template[name_start..name_end].trim();
                if name.is_empty() {
                    return Err(TemplateError::EmptyVariableName { position: pos });
                }
                segments.push(Segment::Variable {
                    name,
                    position: pos,
                });
            }
            '}' => {
                // `}}` collapses to one brace; a lone `}` is kept as-is.
                if let Some((_, '}')) = chars.peek() {
                    chars.next();
                }
                segments.push(Segment::Literal('}'));
            }
            c => segments.push(Segment::Literal(c)),
        }
    }

    Ok(segments)
}

/// Render a template string by substituting variables.
///
/// ```
/// use textforge::prompt::{render_template, vars};
///
/// let vars = vars([("topic", "the ocean")]);
/// let result = render_template("Write a poem about {topic}.", &vars).unwrap();
/// assert_eq!(result, "Write a poem about the ocean.");
/// ```
pub fn render_template(
    template: &str,
    variables: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());

    for segment in parse(template)? {
        match segment {
            Segment::Literal(c) => result.push(c),
            Segment::Variable { name, position } => match variables.get(name) {
                Some(value) => result.push_str(value),
                None => {
                    return Err(TemplateError::UndefinedVariable {
                        name: name.to_string(),
                        position,
                    });
                }
            },
        }
    }

    Ok(result)
}

/// Check that a template parses and only references names in `allowed`.
///
/// Used to reject bad template overrides when configuration is loaded rather
/// than on the first request that hits them.
pub fn check_template(template: &str, allowed: &[&str]) -> Result<(), TemplateError> {
    for segment in parse(template)? {
        if let Segment::Variable { name, position } = segment
            && !allowed.contains(&name)
        {
            return Err(TemplateError::UndefinedVariable {
                name: name.to_string(),
                position,
            });
        }
    }
    Ok(())
}

/// Helper to create a variables map from a list of key-value pairs.
pub fn vars<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
