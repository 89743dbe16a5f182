//! Rendering of structured values as PHP array literals.
//!
//! Output uses short-array syntax with one entry per line:
//!
//! ```text
//! [
//!     "key" => "group_1a2b3c4d5e6f7",
//!     "fields" => [
//!         "first",
//!         "second"
//!     ]
//! ]
//! ```
//!
//! Rendering is pure: the same value always yields the same bytes, which is
//! what makes generated files reviewable as diffs.

use std::fmt::Write as _;

use fieldsmith_core::{Map, Value};

use crate::builder::Indent;

/// Renders [`Value`] trees as PHP source.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpRenderer {
    indent: Indent,
}

impl PhpRenderer {
    pub fn new(indent: Indent) -> Self {
        Self { indent }
    }

    /// Render a value whose opening line is at indentation level 0.
    pub fn render(&self, value: &Value) -> String {
        self.render_at(value, 0)
    }

    /// Render a value whose container sits at `level`.
    ///
    /// The first line is not indented (it continues whatever precedes it);
    /// nested entries and the closing bracket are indented relative to `level`.
    pub fn render_at(&self, value: &Value, level: usize) -> String {
        let mut out = String::new();
        self.write_value(value, level, &mut out);
        out
    }

    fn write_value(&self, value: &Value, level: usize, out: &mut String) {
        match value {
            Value::Null => out.push_str("NULL"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Int(i) => {
                let _ = write!(out, "{i}");
            }
            Value::Float(f) => write_float(*f, out),
            Value::Str(s) => write_str(s, out),
            Value::List(items) => {
                let entries: Vec<_> = items.iter().map(|v| (None, v)).collect();
                self.write_entries(&entries, level, out);
            }
            Value::Map(map) => self.write_map(map, level, out),
        }
    }

    fn write_map(&self, map: &Map, level: usize, out: &mut String) {
        let sequential = Value::is_sequential_map(map);
        let entries: Vec<_> = map
            .iter()
            .map(|(k, v)| ((!sequential).then_some(k.as_str()), v))
            .collect();
        self.write_entries(&entries, level, out);
    }

    fn write_entries(&self, entries: &[(Option<&str>, &Value)], level: usize, out: &mut String) {
        if entries.is_empty() {
            out.push_str("[]");
            return;
        }

        let inner = self.indent.repeat(level + 1);
        out.push_str("[\n");
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 {
                out.push_str(",\n");
            }
            out.push_str(&inner);
            if let Some(key) = key {
                write_str(key, out);
                out.push_str(" => ");
            }
            self.write_value(value, level + 1, out);
        }
        out.push('\n');
        out.push_str(&self.indent.repeat(level));
        out.push(']');
    }
}

/// Write a double-quoted PHP string literal.
///
/// Backslash, dollar, and double quote are escaped so the literal neither
/// interpolates nor terminates early. Control characters use their named
/// escape where PHP has one, octal otherwise.
fn write_str(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '"' => out.push_str("\\\""),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            '\x0c' => out.push_str("\\f"),
            c if c < ' ' || c == '\x7f' => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn write_float(f: f64, out: &mut String) {
    if f.is_nan() {
        out.push_str("NAN");
    } else if f.is_infinite() {
        out.push_str(if f > 0.0 { "INF" } else { "-INF" });
    } else {
        // Debug keeps a trailing `.0` on integral values, so PHP reads a float back.
        let _ = write!(out, "{f:?}");
    }
}

/// Quote a string as a single-quoted PHP literal.
pub fn single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Whether `name` is a valid PHP function name.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
