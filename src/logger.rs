// src/logger.rs
use crate::config::LoggingCfg;
use anyhow::Result;
use once_cell::sync::OnceCell;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::SystemTime;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

// keep the file guard alive so the appender background thread doesn't exit
static GUARD: OnceCell<WorkerGuard> = OnceCell::new();

type Filtered = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<Filtered> + Send + Sync>;

/// Map the configured level to a filter directive, falling back to "info".
pub fn normalize_level(level: &str) -> String {
    match level.to_ascii_lowercase().as_str() {
        l @ ("trace" | "debug" | "info" | "warn" | "error") => l.to_string(),
        _ => "info".to_string(),
    }
}

fn fmt_layer<W>(writer: W, json: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    if json {
        fmt::layer()
            .with_writer(writer)
            .json()
            .with_timer(SystemTime)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(writer)
            .compact()
            .with_timer(SystemTime)
            .boxed()
    }
}

/// Install the global subscriber. Logs never go to stdout, which carries
/// responses.
pub fn init_logger(cfg: &LoggingCfg) -> Result<()> {
    let json = cfg.format.eq_ignore_ascii_case("json");
    let mut layers: Vec<BoxedLayer> = Vec::new();

    match cfg.path.as_deref() {
        Some(file) => {
            let path = Path::new(file);
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)?;
            let file_name = path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("fulfillment-ids.log"));
            let (nb_file, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            let _ = GUARD.set(guard);

            layers.push(fmt_layer(nb_file, json));
            if cfg.also_stderr.unwrap_or(false) {
                layers.push(fmt_layer(std::io::stderr, json));
            }
        }
        None => layers.push(fmt_layer(std::io::stderr, json)),
    }

    // Bridge `log` macros into `tracing`
    let _ = LogTracer::init();

    // prefer RUST_LOG if set, otherwise fall back to cfg.level
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(normalize_level(&cfg.level)));

    let subscriber = Registry::default().with(env_filter).with(layers);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("failed to set global tracing subscriber: {}", e))?;

    tracing::info!(
        file = cfg.path.as_deref().unwrap_or("-"),
        format = %cfg.format,
        "logging initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_pass_through() {
        assert_eq!(normalize_level("DEBUG"), "debug");
        assert_eq!(normalize_level("warn"), "warn");
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(normalize_level("verbose"), "info");
        assert_eq!(normalize_level(""), "info");
    }
}
