//! Request timing middleware.
//!
//! Measures every request and reports the elapsed time either to the remote
//! collector or as an `X-Timing` response header. The wrapped handler's
//! response is passed through untouched apart from that header.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Method, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{AppConfig, TimingMode};
use crate::metrics::{PublishResult, PublishSettings, Publisher, PublisherConfig};

/// Response header carrying the elapsed duration in header-only mode.
pub const X_TIMING: &str = "x-timing";

/// Replace path separators and other characters that would break the
/// dot-delimited metric hierarchy. Leading and trailing separators are
/// dropped so `/v1/hello/` becomes `v1_hello`.
pub fn endpoint_segment(path: &str) -> String {
    path.trim_matches('/')
        .chars()
        .map(|c| match c {
            '/' | '@' | '.' => '_',
            c => c,
        })
        .collect()
}

/// The fixed prefix of every metric name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricNaming {
    pub environment: String,
    pub source: String,
}

impl MetricNaming {
    /// `{environment}.{source}.{endpoint}.{method}.elapsed`
    pub fn metric_name(&self, path: &str, method: &Method) -> String {
        format!(
            "{}.{}.{}.{}.elapsed",
            self.environment,
            self.source,
            endpoint_segment(path),
            method.as_str().to_ascii_lowercase()
        )
    }
}

#[derive(Debug, Clone)]
enum Reporter {
    Remote {
        publisher: Arc<Publisher>,
        naming: MetricNaming,
    },
    HeaderOnly,
}

/// Middleware state, built once and shared by every request.
#[derive(Debug, Clone)]
pub struct Timing {
    reporter: Reporter,
}

impl Timing {
    /// Report to the remote collector through `publisher`.
    pub fn remote(publisher: Arc<Publisher>, naming: MetricNaming) -> Self {
        Self {
            reporter: Reporter::Remote { publisher, naming },
        }
    }

    /// Only annotate responses with `X-Timing`.
    pub fn header_only() -> Self {
        Self {
            reporter: Reporter::HeaderOnly,
        }
    }

    /// Build the middleware state for the configured mode. In remote mode
    /// this creates the process's single publisher.
    pub fn from_config(config: &AppConfig) -> PublishResult<Self> {
        match config.metrics.mode {
            TimingMode::HeaderOnly => Ok(Self::header_only()),
            TimingMode::Remote => {
                let publisher_config = PublisherConfig {
                    host: config.metrics.grafana_url.clone(),
                    source: config.app_name.clone(),
                    user: config.metrics.grafana_user.clone(),
                    api_key: config.metrics.grafana_apikey.clone(),
                    environment: config.environment.clone(),
                };
                let publisher = Publisher::configure(
                    publisher_config,
                    PublishSettings::from(&config.metrics),
                )?;
                let naming = MetricNaming {
                    environment: publisher.config().environment.clone(),
                    source: publisher.config().source.clone(),
                };
                Ok(Self::remote(Arc::new(publisher), naming))
            }
        }
    }

    pub fn mode(&self) -> TimingMode {
        match self.reporter {
            Reporter::Remote { .. } => TimingMode::Remote,
            Reporter::HeaderOnly => TimingMode::HeaderOnly,
        }
    }
}

/// Time the wrapped handler and report the result.
pub async fn timing_middleware(
    State(timing): State<Timing>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let path = request.uri().path().to_string();
    let method = request.method().clone();

    let mut response = next.run(request).await;
    let elapsed = start.elapsed();

    match &timing.reporter {
        Reporter::Remote { publisher, naming } => {
            let name = naming.metric_name(&path, &method);
            tracing::debug!(metric = %name, elapsed = ?elapsed, "Request timed");
            // The handle is dropped: the request never waits on the publish.
            let _ = publisher.send_async(name, elapsed_nanos(elapsed));
        }
        Reporter::HeaderOnly => {
            response.headers_mut().insert(X_TIMING, timing_header(elapsed));
        }
    }

    response
}

/// Human-readable elapsed time as a visible-ASCII header value, e.g.
/// `23.456us` or `1.2ms`.
pub fn timing_header(elapsed: Duration) -> HeaderValue {
    let text = format!("{:?}", elapsed).replace('\u{b5}', "u");
    // Digits, '.', and an ns/us/ms/s unit always form a valid value.
    HeaderValue::from_str(&text).unwrap_or_else(|_| HeaderValue::from(elapsed_nanos(elapsed)))
}

fn elapsed_nanos(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_segment() {
        assert_eq!(endpoint_segment("/v1/hello"), "v1_hello");
        assert_eq!(endpoint_segment("/v1/hello/"), "v1_hello");
        assert_eq!(endpoint_segment("/users/jane@example.com"), "users_jane_example_com");
        assert_eq!(endpoint_segment("/"), "");
    }

    #[test]
    fn test_endpoint_segment_never_contains_separators() {
        for path in ["/a/b/c", "/v1.2/x@y/", "//..//@@", "/static/app.min.js"] {
            let segment = endpoint_segment(path);
            assert!(!segment.contains(&['/', '@', '.'][..]), "{path} -> {segment}");
        }
    }

    #[test]
    fn test_metric_name() {
        let naming = MetricNaming {
            environment: "development".into(),
            source: "ziggy".into(),
        };
        assert_eq!(
            naming.metric_name("/v1/hello", &Method::GET),
            "development.ziggy.v1_hello.get.elapsed"
        );
        assert_eq!(
            naming.metric_name("/v1/orders/42/", &Method::DELETE),
            "development.ziggy.v1_orders_42.delete.elapsed"
        );
    }

    #[test]
    fn test_from_config_selects_mode() {
        let mut config = AppConfig::default();
        assert_eq!(Timing::from_config(&config).unwrap().mode(), TimingMode::HeaderOnly);

        config.metrics.mode = TimingMode::Remote;
        config.metrics.grafana_url = "http://127.0.0.1:1/metrics".into();
        assert_eq!(Timing::from_config(&config).unwrap().mode(), TimingMode::Remote);
    }

    #[test]
    fn test_timing_header_is_visible_ascii() {
        for (elapsed, expected) in [
            (Duration::from_nanos(850), "850ns"),
            (Duration::from_nanos(23_456), "23.456us"),
            (Duration::from_micros(1_500), "1.5ms"),
            (Duration::from_millis(2_250), "2.25s"),
        ] {
            let value = timing_header(elapsed);
            assert!(value.as_bytes().iter().all(|b| b.is_ascii_graphic()));
            assert_eq!(value.to_str().unwrap(), expected);
        }
    }

    #[test]
    fn test_elapsed_nanos_saturates() {
        assert_eq!(elapsed_nanos(Duration::from_micros(3)), 3_000);
        assert_eq!(elapsed_nanos(Duration::MAX), u64::MAX);
    }
}
