use routeprobe::handlers::*;
use routeprobe_core::{RunOptions, RunOutcome, load_report};
use routeprobe_scanner::{RouteDescriptor, RouteStatus, RouteType};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[test]
fn test_expand_path_leaves_plain_paths_alone() {
    assert_eq!(
        expand_path("headers_test_results.json"),
        PathBuf::from("headers_test_results.json")
    );
    assert_eq!(expand_path("/tmp/out.json"), PathBuf::from("/tmp/out.json"));
}

#[test]
fn test_expand_path_expands_tilde() {
    let expanded = expand_path("~/results.json");
    assert!(!expanded.to_string_lossy().starts_with('~'));
    assert!(expanded.ends_with("results.json"));
}

#[test]
fn test_load_routes_defaults_to_builtin_catalogue() {
    let routes = load_routes(None).unwrap();
    assert_eq!(routes.len(), 11);
    assert_eq!(routes[0].path, "/");
}

#[test]
fn test_load_routes_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("routes.json");
    fs::write(
        &path,
        r#"[{"path": "/health", "type": "api", "description": "Health"}]"#,
    )?;

    let routes = load_routes(Some(&path))?;
    assert_eq!(routes, vec![RouteDescriptor::new("/health", RouteType::Api, "Health")]);

    Ok(())
}

#[tokio::test]
async fn test_run_check_writes_report() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Cache-Control", "public, max-age=3600"),
        )
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("headers_test_results.json");

    let mut options = RunOptions::new(&mock_server.uri());
    options.routes = vec![
        RouteDescriptor::new("/", RouteType::Html, "Home page"),
        RouteDescriptor::new("/sw.js", RouteType::Pwa, "Service Worker"),
    ];

    let outcome = run_check(options, &output, None).await.unwrap();
    assert!(matches!(outcome, RunOutcome::Completed(_)));

    let saved = load_report(&output).unwrap();
    assert_eq!(saved.results.len(), 2);
    assert_eq!(saved.results[0].status, RouteStatus::Code(200));
    assert_eq!(
        saved.results[0].header("cache-control"),
        Some("public, max-age=3600")
    );
    assert_eq!(saved.results[1].status, RouteStatus::Code(404));
}

#[tokio::test]
async fn test_run_check_writes_nothing_when_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("headers_test_results.json");

    let outcome = run_check(
        RunOptions::new(&format!("http://127.0.0.1:{}", port)),
        &output,
        None,
    )
    .await
    .unwrap();

    assert!(matches!(outcome, RunOutcome::ServerUnreachable));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_run_check_rejects_invalid_base_url() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.json");

    let result = run_check(RunOptions::new("not a url"), &output, None).await;
    assert!(result.is_err());
    assert!(!output.exists());
}
