//! Integration test: real libcurl client against a local HTTP server.
//!
//! Covers single fetches (200, 404, timeout) and a full modules-layout batch
//! through `load_and_run`.

mod common;

use assetpull_core::config::AssetpullConfig;
use assetpull_core::fetch::{CurlClient, FetchError, Fetcher};
use assetpull_core::runner;
use common::asset_server::{self, Route};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn fetcher(timeout: Duration) -> Fetcher<CurlClient> {
    Fetcher::new(CurlClient::new(Duration::from_secs(5)), timeout)
}

#[test]
fn fetch_200_writes_exact_body() {
    let base = asset_server::start(vec![("/a.png", Route::ok(b"PNGDATA"))]);
    let dir = tempdir().unwrap();
    let dest = dir.path().join("images").join("a.png");

    let n = fetcher(Duration::from_secs(10))
        .fetch(&format!("{base}/a.png"), &dest)
        .expect("fetch");

    assert_eq!(n, 7);
    assert_eq!(fs::read(&dest).unwrap(), b"PNGDATA");
}

#[test]
fn fetch_404_leaves_no_file() {
    let base = asset_server::start(vec![]);
    let dir = tempdir().unwrap();
    let dest = dir.path().join("images").join("gone.png");

    let err = fetcher(Duration::from_secs(10))
        .fetch(&format!("{base}/gone.png"), &dest)
        .unwrap_err();

    assert!(matches!(err, FetchError::Http(404)), "got {err:?}");
    assert!(!dest.exists());
}

#[test]
fn fetch_times_out() {
    let base = asset_server::start(vec![("/slow.png", Route::slow(Duration::from_secs(3)))]);
    let dir = tempdir().unwrap();
    let dest = dir.path().join("slow.png");

    let err = fetcher(Duration::from_secs(1))
        .fetch(&format!("{base}/slow.png"), &dest)
        .unwrap_err();

    assert!(matches!(err, FetchError::Timeout(_)), "got {err:?}");
    assert!(!dest.exists());
}

#[test]
fn fetch_connection_refused_is_network_error() {
    // Bind then drop to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let dir = tempdir().unwrap();
    let err = fetcher(Duration::from_secs(5))
        .fetch(
            &format!("http://127.0.0.1:{port}/a.png"),
            &dir.path().join("a.png"),
        )
        .unwrap_err();
    assert!(matches!(err, FetchError::Network(_)), "got {err:?}");
}

#[test]
fn modules_batch_end_to_end() {
    let base = asset_server::start(vec![
        ("/star", Route::ok(b"star-bytes")),
        ("/back", Route::ok(b"back-bytes")),
        ("/map", Route::ok(b"map-bytes")),
        ("/card", Route::ok(b"card-bytes")),
        ("/broken", Route::status(500)),
    ]);
    let dir = tempdir().unwrap();
    let manifest_path = dir.path().join("all_project_images.json");
    fs::write(
        &manifest_path,
        format!(
            r#"{{
                "generated_date": "2025-01-10",
                "modules": {{
                    "module3_service_booking": {{
                        "service_detail_screen": {{ "star_1.png": "{base}/star" }},
                        "common_icons": {{
                            "icon_back_arrow.png": "{base}/back",
                            "icon_close.png": "{base}/broken"
                        }}
                    }},
                    "module3_add_location": {{ "map_farwaniyah.png": "{base}/map" }},
                    "module3_payment_success": {{ "card.png": "{base}/card" }}
                }}
            }}"#
        ),
    )
    .unwrap();
    let cfg = AssetpullConfig {
        manifest_path,
        assets_root: dir.path().join("assets"),
        request_timeout_secs: 10,
        ..AssetpullConfig::default()
    };

    let summary = runner::load_and_run(&cfg, CurlClient::new(cfg.connect_timeout()), |_| {})
        .expect("manifest loads");

    assert_eq!(summary.total, 5);
    assert_eq!(summary.succeeded, 4);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.exit_code(), 1);

    let root = &cfg.assets_root;
    assert_eq!(fs::read(root.join("images/star_1.png")).unwrap(), b"star-bytes");
    assert_eq!(
        fs::read(root.join("images/icon_back_arrow.png")).unwrap(),
        b"back-bytes"
    );
    assert_eq!(
        fs::read(root.join("service_booking/maps/map_farwaniyah.png")).unwrap(),
        b"map-bytes"
    );
    assert_eq!(
        fs::read(root.join("service_booking/payment/card.png")).unwrap(),
        b"card-bytes"
    );
    assert!(!root.join("service_booking/icon_close.png").exists());
}
