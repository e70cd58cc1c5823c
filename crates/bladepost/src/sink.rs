//! Template sinks.

use crate::PortError;

/// Receives converted template bodies.
///
/// Implementations are external collaborators: a template-create API call,
/// a file writer, a test buffer. One `write` happens per ported record.
pub trait TemplateSink {
    /// Persists `content` under `slug`.
    fn write(&mut self, slug: &str, content: &str) -> Result<(), PortError>;
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Vec<(String, String)>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Written entries, in write order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Content most recently written for `slug`, if any.
    pub fn get(&self, slug: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(s, _)| s == slug)
            .map(|(_, content)| content.as_str())
    }
}

impl TemplateSink for MemorySink {
    fn write(&mut self, slug: &str, content: &str) -> Result<(), PortError> {
        self.entries.push((slug.to_string(), content.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_the_latest_write() {
        let mut sink = MemorySink::new();
        sink.write("a", "one").unwrap();
        sink.write("a", "two").unwrap();
        assert_eq!(sink.get("a"), Some("two"));
        assert_eq!(sink.get("missing"), None);
        assert_eq!(sink.entries().len(), 2);
    }
}
