use serde::Deserialize;
use serde_json::Value;

/// Analyst-entered value for a score or weight field, classified before any clamping.
///
/// Form fields and JSON bodies both funnel through here so the store and the weight
/// configuration never see raw text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "Value")]
pub enum RawInput {
    /// Empty or whitespace-only entry.
    #[default]
    Blank,
    /// A finite number, not yet rounded or clamped.
    Number(f64),
    /// Anything that is neither blank nor a finite number.
    Invalid,
}

impl RawInput {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Blank;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Number(value),
            _ => Self::Invalid,
        }
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Blank,
            Value::Number(number) => match number.as_f64() {
                Some(value) if value.is_finite() => Self::Number(value),
                _ => Self::Invalid,
            },
            Value::String(text) => Self::parse(text),
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => Self::Invalid,
        }
    }

    /// Rounds half away from zero, then clamps into `[min, max]`.
    pub fn clamp_to(&self, min: u8, max: u8) -> Option<u8> {
        match self {
            Self::Number(value) => Some(value.round().clamp(f64::from(min), f64::from(max)) as u8),
            Self::Blank | Self::Invalid => None,
        }
    }
}

impl From<Value> for RawInput {
    fn from(value: Value) -> Self {
        Self::from_json(&value)
    }
}

impl From<&str> for RawInput {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<f64> for RawInput {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Self::Number(value)
        } else {
            Self::Invalid
        }
    }
}

impl From<i32> for RawInput {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for RawInput {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}
