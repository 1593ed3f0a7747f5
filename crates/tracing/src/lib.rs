//! Tracing setup for the chakra CLI.
//!
//! A [`ChakraTracer`] collects the configured outputs (stdout, a rolling log file, journald)
//! and installs them as the global subscriber:
//!
//! ```no_run
//! use chakra_tracing::{ChakraTracer, LayerInfo, LogFormat, Tracer};
//!
//! let _guard = ChakraTracer::new()
//!     .with_stdout(LayerInfo::new(LogFormat::Terminal, "info".to_string(), String::new(), None))
//!     .init()
//!     .expect("failed to init tracing");
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod formatter;
mod layers;

pub use formatter::LogFormat;
pub use layers::{FileInfo, FileWorkerGuard};
use layers::Layers;
// re-exported so the cli can name directives without depending on tracing-subscriber
pub use tracing_subscriber;

/// A boxed, type-erased layer.
pub type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// Settings of a single log output.
#[derive(Debug, Clone)]
pub struct LayerInfo {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: Option<String>,
}

impl LayerInfo {
    /// Creates a new [`LayerInfo`].
    ///
    /// `default_directive` applies when `RUST_LOG` is unset, `filters` is a comma separated list
    /// of extra directives and `color` is one of `always`, `auto` or `never`.
    pub fn new(
        format: LogFormat,
        default_directive: String,
        filters: String,
        color: Option<String>,
    ) -> Self {
        Self { format, default_directive, filters, color }
    }
}

impl Default for LayerInfo {
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            default_directive: "info".to_string(),
            filters: String::new(),
            color: Some("always".to_string()),
        }
    }
}

/// Installs a global tracing subscriber.
pub trait Tracer {
    /// Installs the subscriber. The returned guard must be held for as long as file logging
    /// should keep working.
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>>;
}

/// The tracer used by the chakra CLI.
#[derive(Debug, Clone, Default)]
pub struct ChakraTracer {
    stdout: LayerInfo,
    journald: Option<String>,
    file: Option<(LayerInfo, FileInfo)>,
}

impl ChakraTracer {
    /// Creates a tracer that only logs to stdout with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stdout settings.
    pub fn with_stdout(mut self, config: LayerInfo) -> Self {
        self.stdout = config;
        self
    }

    /// Also logs to journald, using `filter` as directives.
    pub fn with_journald(mut self, filter: String) -> Self {
        self.journald = Some(filter);
        self
    }

    /// Also logs to a rolling file.
    pub fn with_file(mut self, config: LayerInfo, file_info: FileInfo) -> Self {
        self.file = Some((config, file_info));
        self
    }
}

impl Tracer for ChakraTracer {
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>> {
        let mut layers = Layers::new();

        layers.stdout(
            self.stdout.format,
            self.stdout.default_directive.parse()?,
            &self.stdout.filters,
            self.stdout.color,
        )?;

        if let Some(filter) = self.journald {
            layers.journald(&filter)?;
        }

        let file_guard = if let Some((config, file_info)) = self.file {
            Some(layers.file(config.format, &config.filters, file_info)?)
        } else {
            None
        };

        // a subscriber may already be installed, e.g. by a test harness
        let _ = tracing_subscriber::registry().with(layers.into_inner()).try_init();

        Ok(file_guard)
    }
}

/// Installs a stderr subscriber honoring `RUST_LOG`, for use in tests. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
