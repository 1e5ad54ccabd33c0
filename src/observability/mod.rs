//! File-based OpenTelemetry tracing.
//!
//! `tracing` spans and events from the app layer flow through
//! `tracing-opentelemetry` into a span exporter that appends OTLP JSON lines
//! to a local file:
//!
//! ```text
//! tracing → OpenTelemetryLayer → TracerProvider → JSON file exporter → zpokedex-otlp.json
//! ```
//!
//! The file lives in the plugin data directory
//! (`~/.local/share/zellij/zpokedex/`) and rotates at 10 MiB, keeping three
//! numbered backups.
//!
//! The level comes from the `trace_level` plugin option and defaults to
//! `info`. It accepts full `EnvFilter` directives such as
//! `zpokedex::catalog=debug`.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
