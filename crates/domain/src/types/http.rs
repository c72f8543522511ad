//! HTTP request primitives shared by the transport layer

use crate::impl_wire_enum_conversions;

/// HTTP methods the transport client can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Put,
}

impl_wire_enum_conversions!(HttpMethod {
    Get => "GET",
    Post => "POST",
    Put => "PUT",
});

impl HttpMethod {
    /// Whether requests with this method carry the JSON payload as body.
    pub fn sends_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

/// Ordered header list with case-insensitive names.
///
/// Insertion order is preserved so the audit log shows headers the way they
/// were sent. Inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    entries: Vec<(String, String)>,
}

impl RequestHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing any existing header of that name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| existing.eq_ignore_ascii_case(&name)) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Overlay `overrides` on top of `self`; overriding names win.
    #[must_use]
    pub fn merged_with(mut self, overrides: &Self) -> Self {
        for (name, value) in overrides.iter() {
            self.insert(name, value);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `Name: value` lines joined with `\n`.
    pub fn render(&self) -> String {
        self.iter().map(|(name, value)| format!("{name}: {value}")).collect::<Vec<_>>().join("\n")
    }
}
