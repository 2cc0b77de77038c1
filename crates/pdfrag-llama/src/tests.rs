//! Endpoint discovery and generation tests against stub HTTP servers

use insta::assert_yaml_snapshot;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::{EndpointKind, GenerationBackend, LlamaClient, LlamaConfig};
use pdfrag_core::Error;

/// Maps a request path to an HTTP status and JSON body
type Responder = fn(&str) -> (u16, String);

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

async fn handle_connection(mut socket: TcpStream, responder: Responder) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let path = loop {
        let Ok(n) = socket.read(&mut chunk).await else {
            return;
        };
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..pos]).to_string();
            let path = head
                .lines()
                .next()
                .and_then(|line| line.split_whitespace().nth(1))
                .unwrap_or("/")
                .to_string();

            let content_length = head
                .lines()
                .find_map(|line| {
                    line.to_ascii_lowercase()
                        .strip_prefix("content-length:")
                        .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                })
                .unwrap_or(0);

            // Drain the rest of the request body before responding
            let mut remaining = content_length.saturating_sub(buf.len() - pos - 4);
            while remaining > 0 {
                let Ok(n) = socket.read(&mut chunk).await else {
                    break;
                };
                if n == 0 {
                    break;
                }
                remaining = remaining.saturating_sub(n);
            }

            break path;
        }
    };

    let (status, body) = responder(&path);
    let reason = if status == 200 { "OK" } else { "Not Found" };
    let response = format!(
        "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
}

/// Spawn a minimal HTTP stub server; returns its base URL
async fn spawn_stub(responder: Responder) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(handle_connection(socket, responder));
        }
    });

    format!("http://{}", addr)
}

/// A base URL where nothing is listening
async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn client_for(base_url: &str) -> LlamaClient {
    LlamaClient::new(LlamaConfig::new(base_url)).unwrap()
}

#[test]
fn test_config_snapshot() {
    let config = LlamaConfig::default();

    assert_yaml_snapshot!(config, @r###"
    ---
    base_url: "http://localhost:8000"
    max_tokens: 500
    temperature: 0.7
    top_p: 0.95
    probe_timeout_secs: 5
    request_timeout_secs: 30
    "###);
}

#[tokio::test]
async fn test_discovery_binds_native_endpoint_first() {
    let base_url = spawn_stub(|_path| (200, r#"{"content":"ok"}"#.to_string())).await;
    let client = client_for(&base_url);

    let endpoint = client.discover_endpoint().await.unwrap();
    assert_eq!(endpoint.kind, EndpointKind::Native);
    assert!(endpoint.url.ends_with("/completion"));
}

#[tokio::test]
async fn test_discovery_falls_back_to_openai_endpoint() {
    // Native route down, OpenAI-compatible route up
    let base_url = spawn_stub(|path| {
        if path == "/v1/completions" {
            (200, r#"{"choices":[{"text":"ok"}]}"#.to_string())
        } else {
            (404, "{}".to_string())
        }
    })
    .await;
    let client = client_for(&base_url);

    let endpoint = client.discover_endpoint().await.unwrap();
    assert_eq!(endpoint.kind, EndpointKind::OpenAi);
}

#[tokio::test]
async fn test_discovery_reports_unavailable_when_nothing_listens() {
    let client = client_for(&dead_base_url().await);
    assert!(client.discover_endpoint().await.is_none());
}

#[tokio::test]
async fn test_generate_parses_native_response() {
    let base_url = spawn_stub(|_path| (200, r#"{"content":"  July 20, 1969  "}"#.to_string())).await;
    let client = client_for(&base_url);

    let answer = client
        .generate("When did Apollo 11 land?", "context", &["space_facts".to_string()])
        .await
        .unwrap();
    assert_eq!(answer, "July 20, 1969");
}

#[tokio::test]
async fn test_generate_uses_openai_shape_after_fallback() {
    let base_url = spawn_stub(|path| {
        if path == "/v1/completions" {
            (200, r#"{"choices":[{"text":" an answer "}]}"#.to_string())
        } else {
            (404, "{}".to_string())
        }
    })
    .await;
    let client = client_for(&base_url);

    let answer = client.generate("q", "c", &[]).await.unwrap();
    assert_eq!(answer, "an answer");
}

#[tokio::test]
async fn test_generate_unreachable_backend_names_the_fix() {
    let client = client_for(&dead_base_url().await);

    let err = client.generate("q", "c", &[]).await.unwrap_err();
    assert!(matches!(err, Error::BackendUnavailable(_)));
    assert!(err.to_string().contains("./server"));
}

#[tokio::test]
async fn test_generate_malformed_body_is_a_parse_error() {
    let base_url = spawn_stub(|_path| (200, "not json at all".to_string())).await;
    let client = client_for(&base_url);

    let err = client.generate("q", "c", &[]).await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[tokio::test]
async fn test_generate_empty_choices_is_a_parse_error() {
    let base_url = spawn_stub(|path| {
        if path == "/v1/completions" {
            (200, r#"{"choices":[]}"#.to_string())
        } else {
            (404, "{}".to_string())
        }
    })
    .await;
    let client = client_for(&base_url);

    let err = client.generate("q", "c", &[]).await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}
