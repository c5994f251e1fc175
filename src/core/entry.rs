/// One listed item of a collection: an ordinal key rendered as a string,
/// and the stored value. `value` is `None` for a hole, i.e. an ordinal
/// below the counter whose entry was never written because an earlier
/// `add` failed half-way. Holes are listed, not skipped, so the panel
/// shows the damage instead of papering over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: Option<String>,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    pub fn missing(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// The display line for this entry, `[key] value`.
    pub fn render(&self) -> String {
        match &self.value {
            Some(value) => format!("[{}] {}", self.key, value),
            None => format!("[{}] <missing>", self.key),
        }
    }
}

/// Current wall clock in milliseconds since the Unix epoch, as stored by
/// every `add`.
pub fn timestamp_now() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}
