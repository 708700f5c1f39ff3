use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
};
use hostpulse::{
    create_app,
    error::ExporterError,
    metrics::{exposition, Collector, MetricRegistry, MetricSample, Sampler, SamplerConfig},
    WebConfig, EXPOSITION_CONTENT_TYPE,
};
use std::sync::Arc;
use tower::ServiceExt;

/// Test the fixed exposition shape for a single unlabeled gauge
#[test]
fn test_single_gauge_exposition_bytes() {
    let registry = MetricRegistry::new();
    registry.set(MetricSample::new("cpu_usage_percent", 42.5));

    assert_eq!(
        exposition::render(&registry.snapshot()),
        "# TYPE cpu_usage_percent gauge\ncpu_usage_percent 42.5\n"
    );
}

/// Test that an empty registry renders an empty document, not an error
#[test]
fn test_empty_registry_renders_empty_document() {
    let registry = MetricRegistry::new();
    assert_eq!(exposition::render(&registry.snapshot()), "");
}

/// Test last-write-wins across an arbitrary set sequence
#[test]
fn test_last_write_wins_per_series() {
    let registry = MetricRegistry::new();
    for value in [10.0, 55.0, 42.5] {
        registry.set(MetricSample::new("cpu_usage_percent", value));
    }
    registry.set(MetricSample::with_labels(
        "cpu_core_usage_percent",
        1.0,
        vec![("core".to_string(), "0".to_string())],
    ));
    registry.set(MetricSample::with_labels(
        "cpu_core_usage_percent",
        2.0,
        vec![("core".to_string(), "0".to_string())],
    ));

    let snapshot = registry.snapshot();
    assert_eq!(snapshot.len(), 2, "one series per identity");
    assert_eq!(
        snapshot.get(&MetricSample::new("cpu_usage_percent", 0.0).key()),
        Some(&42.5)
    );
    let core_key = MetricSample::with_labels(
        "cpu_core_usage_percent",
        0.0,
        vec![("core".to_string(), "0".to_string())],
    )
    .key();
    assert_eq!(snapshot.get(&core_key), Some(&2.0));
}

/// Test that concurrent writes never tear a batched update in half
#[test]
fn test_concurrent_snapshot_consistency() {
    let registry = Arc::new(MetricRegistry::new());
    registry.set_all([MetricSample::new("a", 0.0), MetricSample::new("b", 0.0)]);

    let writer = {
        let registry = registry.clone();
        std::thread::spawn(move || {
            for v in 1..=1000 {
                registry.set_all([
                    MetricSample::new("a", v as f64),
                    MetricSample::new("b", v as f64),
                ]);
            }
        })
    };

    let a_key = MetricSample::new("a", 0.0).key();
    let b_key = MetricSample::new("b", 0.0).key();
    for _ in 0..1000 {
        let snapshot = registry.snapshot();
        let a = snapshot.get(&a_key).copied().expect("series a present");
        let b = snapshot.get(&b_key).copied().expect("series b present");
        assert_eq!(a, b, "snapshot observed half of a batched write");
    }

    writer.join().expect("writer thread should finish");
}

/// Test render determinism across repeated calls
#[test]
fn test_render_idempotent_without_writes() {
    let registry = MetricRegistry::new();
    registry.set(MetricSample::new("memory_usage_percent", 63.7));
    registry.set(MetricSample::with_labels(
        "load_average",
        0.5,
        vec![("window".to_string(), "1m".to_string())],
    ));

    let first = exposition::render(&registry.snapshot());
    let second = exposition::render(&registry.snapshot());
    assert_eq!(first, second);
}

/// Test the full pipeline: sample the real host, then render
#[tokio::test]
async fn test_sample_and_render_pipeline() {
    let registry = Arc::new(MetricRegistry::new());
    let mut sampler = Sampler::new(SamplerConfig::default(), registry.clone());

    sampler.sample_once().await;
    let rendered = exposition::render(&registry.snapshot());

    assert!(rendered.contains("# TYPE cpu_usage_percent gauge"));
    assert!(rendered.contains("# TYPE memory_total_bytes gauge"));
    assert!(rendered.contains("load_average{window=\"1m\"}"));
}

/// Test that a failing cycle leaves previously recorded values readable
#[tokio::test]
async fn test_failed_sample_cycle_preserves_registry() {
    struct FailingCollector;

    impl Collector for FailingCollector {
        fn name(&self) -> &str {
            "failing"
        }

        fn collect(&mut self) -> hostpulse::Result<Vec<MetricSample>> {
            Err(ExporterError::sample_error("simulated OS failure"))
        }
    }

    let registry = Arc::new(MetricRegistry::new());
    registry.set(MetricSample::new("cpu_usage_percent", 42.5));

    let mut sampler = Sampler::with_factory(
        SamplerConfig::default(),
        registry.clone(),
        Box::new(|_| vec![Box::new(FailingCollector)]),
    );
    sampler.sample_once().await;
    sampler.sample_once().await;

    let rendered = exposition::render(&registry.snapshot());
    assert_eq!(
        rendered,
        "# TYPE cpu_usage_percent gauge\ncpu_usage_percent 42.5\n"
    );
}

/// Test WebConfig builder pattern
#[test]
fn test_web_config() {
    let config = WebConfig::default()
        .with_host("127.0.0.1")
        .with_port(9090)
        .with_cors(false);

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9090);
    assert!(!config.enable_cors);
    assert_eq!(config.bind_address(), "127.0.0.1:9090");
}

/// Test the scrape endpoint end to end through the router
#[tokio::test]
async fn test_metrics_endpoint_serves_exposition() {
    let registry = Arc::new(MetricRegistry::new());
    registry.set(MetricSample::new("cpu_usage_percent", 42.5));

    let app = create_app(&WebConfig::default(), registry);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(CONTENT_TYPE)
            .expect("content type set"),
        EXPOSITION_CONTENT_TYPE
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    assert_eq!(
        body,
        "# TYPE cpu_usage_percent gauge\ncpu_usage_percent 42.5\n"
    );
}

/// Test that the scrape endpoint stays 200 over an empty registry
#[tokio::test]
async fn test_metrics_endpoint_empty_registry_is_200() {
    let registry = Arc::new(MetricRegistry::new());

    let app = create_app(&WebConfig::default(), registry);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    assert!(body.is_empty());
}

/// Test the health endpoint shape
#[tokio::test]
async fn test_health_endpoint() {
    let registry = Arc::new(MetricRegistry::new());

    let app = create_app(&WebConfig::default(), registry);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("health body is JSON");
    assert_eq!(json.get("status").and_then(|v| v.as_str()), Some("ok"));
    assert_eq!(
        json.get("service").and_then(|v| v.as_str()),
        Some("hostpulse")
    );
}
