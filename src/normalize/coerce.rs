//! Field-level coercion of loosely typed wire values.
//!
//! Every function here is total: a value that cannot be interpreted becomes the
//! field's default and a [`ParseWarning`] is recorded. Absent values become the
//! default silently.

use serde_json::Value;

use crate::domain::types::json_kind;
use crate::domain::{IgnoredAlias, RawNumber, RawText};
use crate::error::ParseWarning;

/// Collects warnings while a payload is being normalized.
#[derive(Debug, Default)]
pub struct Coercer {
    warnings: Vec<ParseWarning>,
}

impl Coercer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_warnings(self) -> Vec<ParseWarning> {
        self.warnings
    }

    pub fn warn(&mut self, field: String, raw: impl Into<String>, reason: impl Into<String>) {
        self.warnings.push(ParseWarning {
            field,
            raw: raw.into(),
            reason: reason.into(),
        });
    }

    /// Record every alias key that was shadowed by its canonical key.
    pub fn ignored_aliases(&mut self, ignored: &[IgnoredAlias], path: &str) {
        for a in ignored {
            self.warn(
                field(path, a.alias),
                a.value.to_string(),
                format!("duplicates `{}`; ignored", a.canonical),
            );
        }
    }

    /// Integer-kind field (counts, quantities, ids).
    pub fn int(&mut self, raw: Option<&RawNumber>, path: &str, name: &str) -> i64 {
        let Some(raw) = raw else { return 0 };
        match raw {
            RawNumber::Number(n) => {
                if let Some(v) = n.as_i64() {
                    return v;
                }
                if n.as_u64().is_some() {
                    self.warn(field(path, name), n.to_string(), "integer out of range, clamped");
                    return i64::MAX;
                }
                let v = n.as_f64().unwrap_or(0.0);
                float_to_int(v, self, path, name, &n.to_string())
            }
            RawNumber::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return 0;
                }
                if let Ok(v) = trimmed.parse::<i64>() {
                    return v;
                }
                match parse_finite_f64(trimmed) {
                    Some(v) => float_to_int(v, self, path, name, s),
                    None => {
                        self.warn(field(path, name), s.clone(), "not an integer, using 0");
                        0
                    }
                }
            }
            RawNumber::Other(v) => {
                self.warn(
                    field(path, name),
                    v.to_string(),
                    format!("expected a number, got {}; using 0", json_kind(v)),
                );
                0
            }
        }
    }

    /// Floating-point field (amounts, revenue).
    pub fn float(&mut self, raw: Option<&RawNumber>, path: &str, name: &str) -> f64 {
        let Some(raw) = raw else { return 0.0 };
        match raw {
            RawNumber::Number(n) => match n.as_f64() {
                Some(v) if v.is_finite() => v,
                _ => {
                    self.warn(field(path, name), n.to_string(), "not a finite number, using 0");
                    0.0
                }
            },
            RawNumber::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return 0.0;
                }
                match parse_finite_f64(trimmed) {
                    Some(v) => v,
                    None => {
                        self.warn(field(path, name), s.clone(), "not a number, using 0");
                        0.0
                    }
                }
            }
            RawNumber::Other(v) => {
                self.warn(
                    field(path, name),
                    v.to_string(),
                    format!("expected a number, got {}; using 0", json_kind(v)),
                );
                0.0
            }
        }
    }

    /// String field with a fallback literal for absent/empty values.
    ///
    /// Scalars (numbers, booleans) are rendered as text; containers fall back.
    pub fn text(&mut self, raw: Option<&RawText>, fallback: &str, path: &str, name: &str) -> String {
        match raw {
            None => fallback.to_string(),
            Some(RawText::Text(s)) if s.trim().is_empty() => fallback.to_string(),
            Some(RawText::Text(s)) => s.clone(),
            Some(RawText::Other(v)) => match v {
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => fallback.to_string(),
                _ => {
                    self.warn(
                        field(path, name),
                        v.to_string(),
                        format!("expected a string, got {}; using {fallback:?}", json_kind(v)),
                    );
                    fallback.to_string()
                }
            },
        }
    }
}

fn float_to_int(v: f64, coercer: &mut Coercer, path: &str, name: &str, raw: &str) -> i64 {
    if v.fract() != 0.0 {
        coercer.warn(field(path, name), raw, "fractional value truncated");
    }
    // `as` saturates at the i64 bounds.
    v.trunc() as i64
}

fn parse_finite_f64(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

pub(crate) fn field(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}
