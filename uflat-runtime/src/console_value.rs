// Console variable values and the native conversion rules between them.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConsoleValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    String(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleValueType {
    Bool,
    Int,
    Float,
    String,
}

impl ConsoleValue {
    pub fn value_type(&self) -> ConsoleValueType {
        match self {
            ConsoleValue::Bool(_) => ConsoleValueType::Bool,
            ConsoleValue::Int(_) => ConsoleValueType::Int,
            ConsoleValue::Float(_) => ConsoleValueType::Float,
            ConsoleValue::String(_) => ConsoleValueType::String,
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            ConsoleValue::Bool(b) => *b,
            ConsoleValue::Int(i) => *i != 0,
            ConsoleValue::Float(f) => *f != 0.0,
            ConsoleValue::String(s) => parse_bool(s),
        }
    }

    pub fn as_int(&self) -> i32 {
        match self {
            ConsoleValue::Bool(b) => *b as i32,
            ConsoleValue::Int(i) => *i,
            ConsoleValue::Float(f) => *f as i32,
            ConsoleValue::String(s) => parse_leading_int(s),
        }
    }

    pub fn as_float(&self) -> f32 {
        match self {
            ConsoleValue::Bool(b) => *b as i32 as f32,
            ConsoleValue::Int(i) => *i as f32,
            ConsoleValue::Float(f) => *f,
            ConsoleValue::String(s) => s.trim().parse().unwrap_or(0.0),
        }
    }

    /// Convert into a value of type `ty`, the way a typed variable stores an
    /// assignment of another type.
    pub fn coerce(&self, ty: ConsoleValueType) -> ConsoleValue {
        match ty {
            ConsoleValueType::Bool => ConsoleValue::Bool(self.as_bool()),
            ConsoleValueType::Int => ConsoleValue::Int(self.as_int()),
            ConsoleValueType::Float => ConsoleValue::Float(self.as_float()),
            ConsoleValueType::String => ConsoleValue::String(self.to_string()),
        }
    }
}

impl fmt::Display for ConsoleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleValue::Bool(b) => write!(f, "{b}"),
            ConsoleValue::Int(i) => write!(f, "{i}"),
            ConsoleValue::Float(v) => write!(f, "{v}"),
            ConsoleValue::String(s) => f.write_str(s),
        }
    }
}

fn parse_bool(s: &str) -> bool {
    let s = s.trim();
    ["true", "yes", "on"].iter().any(|t| s.eq_ignore_ascii_case(t))
        || s.parse::<f64>().is_ok_and(|v| v != 0.0)
}

/// `atoi`-style: optional sign then leading digits; anything else is 0.
fn parse_leading_int(s: &str) -> i32 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    let magnitude = digits[..end].parse::<i64>().unwrap_or(0);
    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
