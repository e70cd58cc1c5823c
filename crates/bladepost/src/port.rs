//! Porting orchestration: source → convert → sink.

use bladepost_convert::convert;

use crate::{PortError, TemplateSink, TemplateSource};

/// Outcome of a porting run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PortSummary {
    /// Slugs converted and written, in source order.
    pub converted: Vec<String>,
    /// Slugs skipped because their record carried no body.
    pub skipped: Vec<String>,
}

/// Ports every record from `source` into `sink`.
///
/// Records without a body are skipped and reported in the summary; every
/// other body is converted with [`convert`] and written under its record's
/// slug. A source or sink error aborts the run and propagates.
pub fn port_templates(
    source: &impl TemplateSource,
    sink: &mut impl TemplateSink,
) -> Result<PortSummary, PortError> {
    let mut summary = PortSummary::default();
    for record in source.list()? {
        if !record.has_body() {
            summary.skipped.push(record.slug);
            continue;
        }
        let converted = convert(&record.html);
        sink.write(&record.slug, &converted)?;
        summary.converted.push(record.slug);
    }
    Ok(summary)
}
