//! Tests for the HTTP detail source against a local one-shot server.

use std::time::Duration;

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use waypost_core::loader::HttpDetailSource;
use waypost_core::{DetailSource, FetchError};

/// Serves one canned response and returns the base url plus a handle
/// resolving to the raw request line.
async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let n = socket.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).to_string();
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        request.lines().next().unwrap_or_default().to_string()
    });
    (format!("http://{addr}/markers"), handle)
}

#[tokio::test]
async fn test_http_success() {
    let (url, server) = serve_once("200 OK", r#"{"phone":"080-1234","beds":12}"#).await;
    let source = HttpDetailSource::new(&url, Duration::from_secs(5)).unwrap();

    let details = source.fetch_details("h-1").await.unwrap();

    assert_eq!(details.get("phone"), Some(&json!("080-1234")));
    assert_eq!(details.get("beds"), Some(&json!(12)));
    assert_eq!(server.await.unwrap(), "GET /markers/h-1 HTTP/1.1");
}

#[tokio::test]
async fn test_http_error_status() {
    let (url, _server) = serve_once("500 Internal Server Error", "{}").await;
    let source = HttpDetailSource::new(&url, Duration::from_secs(5)).unwrap();
    assert_eq!(source.fetch_details("h-1").await, Err(FetchError::Status(500)));
}

#[tokio::test]
async fn test_http_not_found() {
    let (url, _server) = serve_once("404 Not Found", "{}").await;
    let source = HttpDetailSource::new(&url, Duration::from_secs(5)).unwrap();
    assert_eq!(
        source.fetch_details("ghost").await,
        Err(FetchError::NotFound("ghost".into()))
    );
}

#[tokio::test]
async fn test_http_malformed_body() {
    let (url, _server) = serve_once("200 OK", "[1,2,3]").await;
    let source = HttpDetailSource::new(&url, Duration::from_secs(5)).unwrap();
    assert!(matches!(
        source.fetch_details("h-1").await,
        Err(FetchError::Decode(_))
    ));

    let (url, _server) = serve_once("200 OK", "{not json").await;
    let source = HttpDetailSource::new(&url, Duration::from_secs(5)).unwrap();
    assert!(matches!(
        source.fetch_details("h-1").await,
        Err(FetchError::Decode(_))
    ));
}

#[tokio::test]
async fn test_http_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpDetailSource::new(&format!("http://{addr}/markers"), Duration::from_secs(5))
        .unwrap();
    assert!(matches!(
        source.fetch_details("h-1").await,
        Err(FetchError::Transport(_))
    ));
}
