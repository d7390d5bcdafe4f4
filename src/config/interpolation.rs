//! Variable interpolation for service templates.
//!
//! Templates may reference settings-derived values with `${variable}`
//! syntax. The raw template text is rendered before it is parsed as YAML,
//! so a reference can appear anywhere a scalar can.
//!
//! # Syntax
//!
//! - `${variable_name}` - replaced with variable value
//! - `$${escaped}` - produces literal `${escaped}` in output, which Heat
//!   parameters sometimes need
//!
//! # Example
//!
//! ```
//! use onaptests::config::{resolve_string, InterpolationContext};
//!
//! let mut ctx = InterpolationContext::new();
//! ctx.values.insert("service_instance_name".into(), "basic_vm".into());
//!
//! let name = resolve_string("${service_instance_name}-net", &ctx).unwrap();
//! assert_eq!(name, "basic_vm-net");
//! ```

use std::collections::HashMap;

use crate::error::{HarnessError, Result};

/// A piece of a template string, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied as is.
    Literal(&'a str),
    /// An escaped reference, already stripped of its extra `$`.
    Escaped(&'a str),
    /// A `${name}` reference, name trimmed.
    Variable(&'a str),
}

/// Split `input` into literal text and variable references.
///
/// # Errors
///
/// Returns `ConfigValidationError` when a `${` is never closed.
pub fn parse_interpolation(input: &str) -> Result<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    let mut rest = input;
    let mut offset = 0;

    while let Some(open) = rest.find("${") {
        let escaped = open > 0 && rest.as_bytes()[open - 1] == b'$';
        let literal_end = if escaped { open - 1 } else { open };
        if literal_end > 0 {
            segments.push(Segment::Literal(&rest[..literal_end]));
        }

        let close = rest[open..]
            .find('}')
            .map(|i| open + i)
            .ok_or_else(|| HarnessError::ConfigValidationError {
                message: format!("Unterminated '${{' at offset {}", offset + open),
            })?;
        if escaped {
            segments.push(Segment::Escaped(&rest[open..=close]));
        } else {
            segments.push(Segment::Variable(rest[open + 2..close].trim()));
        }

        offset += close + 1;
        rest = &rest[close + 1..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    Ok(segments)
}

/// Values a template can reference.
///
/// Values derived from settings take priority over the process
/// environment.
#[derive(Debug, Default)]
pub struct InterpolationContext {
    /// Settings-derived values (service_name, cloud_owner, ...)
    pub values: HashMap<String, String>,

    /// Environment variables
    pub env: HashMap<String, String>,
}

impl InterpolationContext {
    /// Create a context with the crate version as its only value.
    pub fn new() -> Self {
        let mut values = HashMap::new();
        values.insert(
            "onaptests_version".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );

        Self {
            values,
            ..Default::default()
        }
    }

    /// Add environment variables.
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Add the current process environment.
    pub fn with_process_env(self) -> Self {
        self.with_env(std::env::vars().collect())
    }

    /// Value of `name`, if known.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .or_else(|| self.env.get(name))
            .map(String::as_str)
    }
}

/// Render `input` against `context`.
///
/// # Errors
///
/// Returns `ConfigValidationError` naming every variable the context
/// cannot resolve, not just the first.
pub fn resolve_string(input: &str, context: &InterpolationContext) -> Result<String> {
    let mut rendered = String::with_capacity(input.len());
    let mut missing: Vec<&str> = Vec::new();

    for segment in parse_interpolation(input)? {
        match segment {
            Segment::Literal(text) | Segment::Escaped(text) => rendered.push_str(text),
            Segment::Variable(name) => match context.resolve(name) {
                Some(value) => rendered.push_str(value),
                None if !missing.contains(&name) => missing.push(name),
                None => {}
            },
        }
    }

    if missing.is_empty() {
        Ok(rendered)
    } else {
        let names: Vec<String> = missing.iter().map(|n| format!("${{{}}}", n)).collect();
        Err(HarnessError::ConfigValidationError {
            message: format!("Unresolved variable(s): {}", names.join(", ")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_only() {
        assert_eq!(
            parse_interpolation("basic_vm").unwrap(),
            vec![Segment::Literal("basic_vm")]
        );
    }

    #[test]
    fn variable_with_surrounding_text() {
        assert_eq!(
            parse_interpolation("vnf-${service_name}-01").unwrap(),
            vec![
                Segment::Literal("vnf-"),
                Segment::Variable("service_name"),
                Segment::Literal("-01"),
            ]
        );
    }

    #[test]
    fn adjacent_variables_and_trimmed_names() {
        assert_eq!(
            parse_interpolation("${a}${ b }").unwrap(),
            vec![Segment::Variable("a"), Segment::Variable("b")]
        );
    }

    #[test]
    fn escaped_reference_stays_literal() {
        assert_eq!(
            parse_interpolation("get_param: $${image}").unwrap(),
            vec![Segment::Literal("get_param: "), Segment::Escaped("${image}")]
        );
    }

    #[test]
    fn lone_dollar_is_text() {
        assert_eq!(
            parse_interpolation("password1$").unwrap(),
            vec![Segment::Literal("password1$")]
        );
        assert!(parse_interpolation("").unwrap().is_empty());
    }

    #[test]
    fn unterminated_reference_is_an_error() {
        let err = parse_interpolation("name: x-${service").unwrap_err();
        assert!(err.to_string().contains("offset 8"));
    }

    #[test]
    fn resolve_prefers_values_over_env() {
        let mut env = HashMap::new();
        env.insert("region".to_string(), "from_env".to_string());
        env.insert("only_env".to_string(), "env".to_string());
        let mut ctx = InterpolationContext::new().with_env(env);
        ctx.values
            .insert("region".to_string(), "RegionOne".to_string());

        let result = resolve_string("${region}/${only_env}", &ctx).unwrap();
        assert_eq!(result, "RegionOne/env");
    }

    #[test]
    fn resolve_lists_every_missing_variable_once() {
        let ctx = InterpolationContext::new();
        let err = resolve_string("${a}-${b}-${a}", &ctx).unwrap_err();

        assert!(matches!(err, HarnessError::ConfigValidationError { .. }));
        assert!(err.to_string().contains("Unresolved variable(s): ${a}, ${b}"));
    }

    #[test]
    fn resolve_keeps_escaped_text() {
        let ctx = InterpolationContext::new();
        let result = resolve_string("$${NOT_RESOLVED}", &ctx).unwrap();
        assert_eq!(result, "${NOT_RESOLVED}");
    }

    #[test]
    fn context_includes_version() {
        let ctx = InterpolationContext::new();
        assert_eq!(ctx.resolve("onaptests_version"), Some(env!("CARGO_PKG_VERSION")));
    }
}
