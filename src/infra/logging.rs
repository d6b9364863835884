pub fn init() {
    // Honor RUST_LOG, default to info. Logs go to stderr: stdout carries MCP
    // frames in stdio mode.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Record a metric on the global recorder and mirror it as a log line.
pub fn log_metric(tool: &str, metric: &str, value: f64) {
    metrics::histogram!(metric.to_owned(), "tool" => tool.to_owned()).record(value);
    tracing::info!(tool = tool, metric = metric, value = value, "metric");
}

/// Bump an error counter for `tool`.
pub fn count_error(tool: &str, metric: &str) {
    metrics::counter!(metric.to_owned(), "tool" => tool.to_owned()).increment(1);
    tracing::info!(tool = tool, metric = metric, value = 1.0, "metric");
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
    }

    #[test]
    fn metrics_without_recorder_are_noops() {
        super::log_metric("github.get", "github_latency_ms", 12.0);
        super::count_error("github.get", "github_error_total");
    }
}
