//! Tracer provider backed by a local OTLP JSON file.

use super::file_writer::RotatingWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Instrumentation scope recorded on every exported batch.
pub const SCOPE_NAME: &str = "zpokedex";

/// Writes each export batch as one OTLP JSON line.
#[derive(Debug)]
struct JsonFileExporter {
    writer: RotatingWriter,
    formatter: SpanFormatter,
    stopped: bool,
}

impl JsonFileExporter {
    const fn new(writer: RotatingWriter, resource: Resource) -> Self {
        Self {
            writer,
            formatter: SpanFormatter::new(resource, SCOPE_NAME),
            stopped: false,
        }
    }
}

impl SpanExporter for JsonFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.stopped {
            Err(TraceError::from("trace exporter already shut down"))
        } else {
            let line = self.formatter.format_batch(&batch).to_string();
            self.writer
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }
}

/// Provider that exports every finished span synchronously to `trace_file`.
///
/// Plugins have no async runtime, so the simple (unbatched) processor is used.
pub fn file_tracer_provider(trace_file: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = JsonFileExporter::new(RotatingWriter::new(trace_file), resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
