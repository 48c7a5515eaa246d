// Integration tests: HTTP endpoints against a fake vnstat binary

use axum_test::TestServer;
use std::sync::Arc;
use vnstat_dashboard::config::{AppConfig, VnstatConfig};
use vnstat_dashboard::models::Granularity;
use vnstat_dashboard::routes;
use vnstat_dashboard::vnstat_repo::VnstatRepo;

/// Shell script standing in for vnstat: prints the default (piped) layout
/// per granularity flag, two years of monthly history.
const FAKE_VNSTAT_PIPED: &str = r#"#!/bin/sh
case "$3" in
  -5) cat <<'EOF'
 2024-03-15
     14:00
         14:05      1,23 MiB |    2,00 MiB |    3,23 MiB |   10,00 KiB/s
EOF
  ;;
  -h) cat <<'EOF'
 2024-03-15
     14:00      1,00 MiB |    2,00 MiB |    3,00 MiB |   12,00 KiB/s
EOF
  ;;
  -d) cat <<'EOF'
     2024-03-15   10,00 MiB |   20,00 MiB |   30,00 MiB |    5,00 KiB/s
EOF
  ;;
  -m) cat <<'EOF'
     2023-12      0,50 GiB |    0,80 GiB |    1,30 GiB |    6,00 KiB/s
     2024-03      1,00 GiB |    2,00 GiB |    3,00 GiB |   15,00 KiB/s
EOF
  ;;
esac
"#;

/// Same stand-in printing the verbose layout (for the history endpoint).
const FAKE_VNSTAT_VERBOSE: &str = r#"#!/bin/sh
case "$3" in
  -5) echo " 2024-03-15 14:05   1,23 MiB   2,00 MiB   3,23 MiB   10,00 KiB/s" ;;
  -h) echo " 2024-03-15 14:00   1,00 MiB   2,00 MiB   3,00 MiB   12,00 KiB/s" ;;
  -d) echo " 2024-03-15   10,00 MiB   20,00 MiB   30,00 MiB   5,00 KiB/s" ;;
  -m) echo " 2024-03   1,00 GiB   2,00 GiB   3,00 GiB   15,00 KiB/s" ;;
esac
"#;

fn write_fake_vnstat(dir: &tempfile::TempDir, script: &str) -> String {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.path().join("vnstat");
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.to_str().unwrap().to_string()
}

fn test_app_config(binary: &str) -> AppConfig {
    AppConfig::load_from_str(&format!(
        r#"
[server]
port = 8090
host = "127.0.0.1"

[vnstat]
binary = "{binary}"
interface = "eth0"
timeout_secs = 5
"#
    ))
    .unwrap()
}

fn test_server(binary: &str) -> TestServer {
    let config = test_app_config(binary);
    let repo = Arc::new(VnstatRepo::new(&config.vnstat).unwrap());
    TestServer::new(routes::app(repo, config))
}

#[tokio::test]
async fn test_dashboard_renders_fixture_data() {
    let dir = tempfile::TempDir::new().unwrap();
    let server = test_server(&write_fake_vnstat(&dir, FAKE_VNSTAT_PIPED));
    let response = server.get("/").await;
    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Traffic on eth0"));
    assert!(body.contains("1.23 MiB"));
    assert!(body.contains("March 2024"));
    assert!(body.contains("2024-03-15"));
    // Two years of monthly data, one shown by default.
    assert!(body.contains("Show more years"));
    assert!(!body.contains("2023"));
}

#[tokio::test]
async fn test_dashboard_with_missing_binary_renders_empty_sections() {
    let server = test_server("/nonexistent/vnstat");
    let response = server.get("/").await;
    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Traffic on eth0"));
    assert!(body.contains("no data"));
}

#[tokio::test]
async fn test_dashboard_clamps_year_queries() {
    let dir = tempfile::TempDir::new().unwrap();
    let server = test_server(&write_fake_vnstat(&dir, FAKE_VNSTAT_PIPED));
    // Zero clamps to one year shown; huge values clamp to what exists.
    let response = server.get("/").add_query_param("years", 0).await;
    response.assert_status_ok();
    let response = server.get("/").add_query_param("years", 99).await;
    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("2023"));
    assert!(!body.contains("Show more years"));
}

#[tokio::test]
async fn test_api_stats_returns_slot_keyed_tree() {
    let dir = tempfile::TempDir::new().unwrap();
    let server = test_server(&write_fake_vnstat(&dir, FAKE_VNSTAT_PIPED));
    let response = server.get("/api/stats").add_query_param("years", 5).await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();

    assert_eq!(json["interface"], "eth0");
    assert_eq!(json["tree"]["2024"]["03"]["_month"]["rx"], "1.00 GiB");
    assert_eq!(json["tree"]["2024"]["03"]["15"]["_day"]["rx"], "10.00 MiB");
    assert_eq!(json["tree"]["2024"]["03"]["15"]["14"]["_hour"]["rx"], "1.00 MiB");
    assert_eq!(
        json["tree"]["2024"]["03"]["15"]["14"]["14:05"]["rx"],
        "1.23 MiB"
    );
    assert_eq!(json["tree"]["2023"]["12"]["_month"]["rx"], "0.50 GiB");
    assert_eq!(json["yearsShown"], 2);
    assert_eq!(json["hasMoreYears"], false);
    assert_eq!(json["fiveMinute"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_api_stats_default_year_window_truncates() {
    let dir = tempfile::TempDir::new().unwrap();
    let server = test_server(&write_fake_vnstat(&dir, FAKE_VNSTAT_PIPED));
    let response = server.get("/api/stats").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json["yearsShown"], 1);
    assert_eq!(json["hasMoreYears"], true);
    assert!(json["tree"].get("2023").is_none());
}

#[tokio::test]
async fn test_api_history_returns_full_parses() {
    let dir = tempfile::TempDir::new().unwrap();
    let server = test_server(&write_fake_vnstat(&dir, FAKE_VNSTAT_VERBOSE));
    let response = server.get("/api/history").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json["hourly"][0]["date"], "2024-03-15");
    assert_eq!(json["hourly"][0]["hour"], "14");
    assert_eq!(json["daily"][0]["total"], "30.00 MiB");
    assert_eq!(json["monthly"][0]["date"], "2024-03");
    assert_eq!(json["fiveMinute"][0]["minute"], "14:05");
}

#[tokio::test]
async fn test_version_endpoint() {
    let server = test_server("/nonexistent/vnstat");
    let response = server.get("/version").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(
        json.get("name").and_then(|v| v.as_str()),
        Some("vnstat-dashboard")
    );
    assert!(json.get("version").and_then(|v| v.as_str()).is_some());
}

// --- VnstatRepo ---

fn vnstat_config(binary: &str, interface: &str, timeout_secs: u64) -> VnstatConfig {
    VnstatConfig {
        binary: binary.into(),
        interface: interface.into(),
        timeout_secs,
        five_minute_window: 12,
        hourly_window: 24,
    }
}

#[test]
fn test_repo_rejects_invalid_interface() {
    let err = VnstatRepo::new(&vnstat_config("vnstat", "eth0; true", 5)).unwrap_err();
    assert!(err.to_string().contains("invalid interface name"));
    assert!(VnstatRepo::new(&vnstat_config("vnstat", "br-lan_0.1", 5)).is_ok());
}

#[tokio::test]
async fn test_fetch_with_missing_binary_returns_empty() {
    let repo = VnstatRepo::new(&vnstat_config("/nonexistent/vnstat", "eth0", 5)).unwrap();
    assert_eq!(repo.fetch(Granularity::Daily).await, "");
}

#[tokio::test]
async fn test_fetch_with_failing_binary_returns_empty() {
    let dir = tempfile::TempDir::new().unwrap();
    let binary = write_fake_vnstat(&dir, "#!/bin/sh\necho boom >&2\nexit 1\n");
    let repo = VnstatRepo::new(&vnstat_config(&binary, "eth0", 5)).unwrap();
    assert_eq!(repo.fetch(Granularity::Monthly).await, "");
}

#[tokio::test]
async fn test_fetch_timeout_returns_empty() {
    let dir = tempfile::TempDir::new().unwrap();
    let binary = write_fake_vnstat(&dir, "#!/bin/sh\nsleep 5\n");
    let repo = VnstatRepo::new(&vnstat_config(&binary, "eth0", 1)).unwrap();
    assert_eq!(repo.fetch(Granularity::FiveMinute).await, "");
}
