//! # Bladepost - Blade email templates, ported to SparkPost syntax
//!
//! `bladepost` turns Blade email templates into SparkPost merge-tag
//! templates. The conversion itself lives in [`bladepost-convert`] and is
//! re-exported here as [`convert`]; this crate adds the porting layer around
//! it: template records, the [`TemplateSource`] and [`TemplateSink`] seams,
//! and [`port_templates`], which moves every record from a source through
//! the converter into a sink.
//!
//! Sources and sinks are deliberately small traits. The shipped
//! [`MemorySource`] and [`MemorySink`] cover tests and embedding; a remote
//! template API, a directory of `.blade.php` files, or a deployment pipeline
//! can implement the same traits without this crate knowing about HTTP or
//! the filesystem.
//!
//! ## Quick Start
//!
//! ```rust
//! use bladepost::{port_templates, MemorySink, MemorySource, TemplateRecord};
//!
//! let mut source = MemorySource::new();
//! source.add(TemplateRecord::new(
//!     "welcome",
//!     "Welcome Email",
//!     "Hello {{ $user->name }}!",
//! ));
//! source.add(TemplateRecord::new("draft", "Draft", ""));
//!
//! let mut sink = MemorySink::new();
//! let summary = port_templates(&source, &mut sink).unwrap();
//!
//! assert_eq!(summary.converted, ["welcome"]);
//! assert_eq!(summary.skipped, ["draft"]);
//! assert_eq!(sink.get("welcome"), Some("Hello {{user.name}}!"));
//! ```
//!
//! ## Converting a single body
//!
//! ```rust
//! use bladepost::convert;
//!
//! assert_eq!(
//!     convert("@if($urgent){{ $subject }}@endif"),
//!     "{{#if urgent}}{{subject}}{{/if}}"
//! );
//! ```
//!
//! [`bladepost-convert`]: bladepost_convert

mod error;
mod port;
mod record;
mod sink;
mod source;

pub use bladepost_convert::convert;
pub use error::PortError;
pub use port::{port_templates, PortSummary};
pub use record::TemplateRecord;
pub use sink::{MemorySink, TemplateSink};
pub use source::{MemorySource, TemplateSource};
