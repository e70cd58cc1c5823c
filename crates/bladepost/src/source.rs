//! Template sources.

use crate::{PortError, TemplateRecord};

/// Supplies template records for porting.
///
/// Implementations are external collaborators: a remote template API, a
/// directory of Blade files, a test fixture. The converter never calls a
/// source itself; only the porting layer does.
pub trait TemplateSource {
    /// Returns every available record, in the source's order.
    fn list(&self) -> Result<Vec<TemplateRecord>, PortError>;
}

/// In-memory source for tests and embedding.
///
/// # Example
///
/// ```rust
/// use bladepost::{MemorySource, TemplateRecord, TemplateSource};
///
/// let mut source = MemorySource::new();
/// source.add(TemplateRecord::new("welcome", "Welcome", "Hi {{ $name }}"));
/// assert_eq!(source.list().unwrap().len(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    records: Vec<TemplateRecord>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, keeping insertion order.
    pub fn add(&mut self, record: TemplateRecord) -> &mut Self {
        self.records.push(record);
        self
    }
}

impl TemplateSource for MemorySource {
    fn list(&self) -> Result<Vec<TemplateRecord>, PortError> {
        Ok(self.records.clone())
    }
}
