//! Daemon parameters supplied by the host configuration.

/// A parameter value with typed views. The host stores every parameter as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    key: String,
    value: String,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// `true` only for the exact text `"true"`.
    pub fn as_bool(&self) -> bool {
        self.value == "true"
    }

    pub fn as_number(&self) -> Option<f64> {
        self.value.trim().parse().ok()
    }

    pub fn into_string(self) -> String {
        self.value
    }
}
