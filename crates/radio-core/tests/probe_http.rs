//! Reachability probe against a local HTTP server.

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use radio_core::probe::{HttpProbe, Probe, Reachability};
use tokio::net::TcpListener;

async fn start_server() -> String {
    let app = Router::new()
        .route("/live.mp3", get(|| async { (StatusCode::OK, "audio bytes") }))
        .route("/gone.mp3", get(|| async { StatusCode::NOT_FOUND }))
        .route("/broken.mp3", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
        .route(
            "/moved.mp3",
            get(|| async {
                axum::response::Redirect::temporary("/live.mp3")
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn success_status_is_reachable() {
    let base = start_server().await;
    let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();
    assert_eq!(probe.check(&format!("{base}/live.mp3")).await, Reachability::Reachable);
}

#[tokio::test]
async fn redirects_are_followed() {
    let base = start_server().await;
    let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();
    assert!(probe.check(&format!("{base}/moved.mp3")).await.is_reachable());
}

#[tokio::test]
async fn error_status_is_unreachable() {
    let base = start_server().await;
    let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();

    for path in ["/gone.mp3", "/broken.mp3"] {
        let verdict = probe.check(&format!("{base}{path}")).await;
        assert!(!verdict.is_reachable(), "{path} should be unreachable");
    }

    match probe.check(&format!("{base}/gone.mp3")).await {
        Reachability::Unreachable(reason) => assert!(reason.contains("404")),
        Reachability::Reachable => panic!("404 must not be reachable"),
    }
}
