//! Request/response logging to a file and the console.
//!
//! # Design
//! `LoggingContext::install` builds a `tracing` subscriber with two sinks
//! (stderr and `<log_dir>/api_requests.log`) and makes it the default for the
//! current thread only. The returned context owns both the dispatch guard and
//! the non-blocking writer guard; dropping it (or calling `shutdown`)
//! uninstalls the subscriber and flushes pending lines to disk. Sessions
//! running on parallel test threads each install their own context and append
//! to the same file.
//!
//! Lines look like `<timestamp> - API Logger - INFO - <message>`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::dispatcher::DefaultGuard;
use tracing::{info, Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpResponse};

pub const LOGGER_NAME: &str = "API Logger";
pub const LOG_FILE_NAME: &str = "api_requests.log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Installed logging sinks for one session.
pub struct LoggingContext {
    log_file: PathBuf,
    // Field order matters: the dispatch guard must drop before the writer
    // guard so no event is routed to a writer that is shutting down.
    _dispatch: DefaultGuard,
    _writer: WorkerGuard,
}

impl LoggingContext {
    pub fn install(log_dir: &Path) -> Result<Self, ApiError> {
        fs::create_dir_all(log_dir)?;
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(LOG_FILE_NAME)
            .build(log_dir)
            .map_err(std::io::Error::other)?;
        let (file_writer, writer_guard) = tracing_appender::non_blocking(appender);

        let subscriber = tracing_subscriber::registry()
            .with(LevelFilter::INFO)
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(LineFormat)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(LineFormat)
                    .with_writer(file_writer)
                    .with_ansi(false),
            );
        let dispatch = tracing::subscriber::set_default(subscriber);

        Ok(Self {
            log_file: log_dir.join(LOG_FILE_NAME),
            _dispatch: dispatch,
            _writer: writer_guard,
        })
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Uninstall the subscriber and flush the file sink.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl fmt::Debug for LoggingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingContext")
            .field("log_file", &self.log_file)
            .finish_non_exhaustive()
    }
}

/// `<timestamp> - <target> - <level> - <message>`
struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{} - {} - {} - ",
            Local::now().format(TIMESTAMP_FORMAT),
            meta.target(),
            meta.level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Entry points for request and response lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiLogger;

impl ApiLogger {
    pub fn log_request(&self, method: HttpMethod, url: &str, payload: Option<&str>) {
        info!(target: LOGGER_NAME, "Request: {method} {url}");
        if let Some(payload) = payload.filter(|p| !p.is_empty()) {
            info!(target: LOGGER_NAME, "Payload: {payload}");
        }
    }

    pub fn log_response(&self, url: &str, response: &HttpResponse) {
        info!(target: LOGGER_NAME, "Response: {} {url}", response.status);
        info!(target: LOGGER_NAME, "Response Body: {}", response.body);
    }

    pub fn log_step(&self, name: &str) {
        info!(target: LOGGER_NAME, "Starting {name}");
    }
}
