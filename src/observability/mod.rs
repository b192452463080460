//! OpenTelemetry tracing exported to a local file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter → JSON lines
//! ```
//!
//! Traces land in `~/.local/share/zellij/truthlens/truthlens-otlp.json`
//! (seen from the sandbox as `/host/.local/share/zellij/truthlens`). The file
//! rotates at 10 MB and three numbered backups are kept.
//!
//! The filter level comes from the `trace_level` plugin option and defaults to
//! `info`. Dispatch failures are logged at `error`, so they are recorded at
//! every level.
//!
//! ```no_run
//! use truthlens::observability::init_tracing;
//! use truthlens::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::RotationPolicy;
pub use init::{init_tracing, TRACE_FILE_NAME};
