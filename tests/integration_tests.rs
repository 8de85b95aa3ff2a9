//! Integration tests for the sadhak library.
//! These run against canned HTTP responses served on a local listener, so no
//! network access or live service is required.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use sadhak::chat::{
    ChatConfig, ChatSession, Renderer, TIMEOUT_NOTICE, TRANSPORT_NOTICE, status_notice,
};
use sadhak::{DonorProfile, FALLBACK_RESPONSE, Role, Sadhak, Turn};

/// Renderer that swallows all output.
struct NullRenderer;

impl Renderer for NullRenderer {
    fn render_turn(&mut self, _: &Turn) {}
    fn print_busy(&mut self) {}
    fn print_info(&mut self, _: &str) {}
    fn print_error(&mut self, _: &str) {}
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Reads one HTTP request (headers plus content-length body) off the socket.
async fn read_request(socket: &mut TcpStream) {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            return;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(header_end) = find(&data, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&data[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() - (header_end + 4) >= content_length {
                return;
            }
        }
    }
}

/// Serves exactly one canned HTTP response and returns the endpoint URL.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/message")
}

/// Accepts one connection and never answers, to force a client timeout.
async fn serve_black_hole() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        tokio::time::sleep(Duration::from_secs(30)).await;
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/message")
}

fn session_for(url: String, timeout: Option<Duration>) -> ChatSession {
    let client = Sadhak::with_options(Some(url), timeout).expect("client should build");
    let config = ChatConfig::new().with_profile(
        DonorProfile::new()
            .with_mobile_number("+919876543210")
            .with_donor_name("Asha")
            .with_donor_code(42),
    );
    ChatSession::new(client, config)
}

#[tokio::test]
async fn successful_send_appends_two_turns_in_order() {
    let url = serve_once(
        "200 OK",
        r#"{"ai_response":"Thank you for reaching out!","ai_reason":"Donation|OneTime"}"#,
    )
    .await;
    let mut session = session_for(url, None);

    session
        .send("I want to donate", &mut NullRenderer)
        .await
        .expect("send should recover or succeed");

    let turns = session.transcript().turns();
    assert_eq!(turns.len(), 2);

    assert_eq!(turns[0].role, Role::User);
    assert_eq!(turns[0].text, "I want to donate");
    assert!(!turns[0].is_image);

    assert_eq!(turns[1].role, Role::Assistant);
    assert_eq!(turns[1].text, "Thank you for reaching out!");
    assert_eq!(turns[1].classification.as_deref(), Some("Donation"));
    assert_eq!(turns[1].sub_classification.as_deref(), Some("OneTime"));
    assert_eq!(turns[1].confidence.as_deref(), Some("HIGH"));

    // The user turn is stamped no later than the assistant turn.
    assert!(turns[0].timestamp <= turns[1].timestamp);
    assert_eq!(session.stats().total_requests, 1);
}

#[tokio::test]
async fn image_submission_marks_the_user_turn() {
    let url = serve_once("200 OK", r#"{"ai_response":"Got your receipt."}"#).await;
    let mut session = session_for(url, None);

    session
        .send("https://example.com/receipt.png", &mut NullRenderer)
        .await
        .unwrap();

    let turns = session.transcript().turns();
    assert_eq!(turns.len(), 2);
    assert!(turns[0].is_image);
    assert_eq!(turns[0].text, "[Image]");
    assert_eq!(
        turns[0].image_url.as_deref(),
        Some("https://example.com/receipt.png")
    );
    // No reason string, no annotation.
    assert_eq!(turns[1].classification, None);
    assert_eq!(turns[1].confidence, None);
}

#[tokio::test]
async fn server_error_appends_one_generic_notice() {
    let url = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
    let mut session = session_for(url, None);

    session
        .send("hello", &mut NullRenderer)
        .await
        .expect("a status error must not escape the submit path");

    let turns = session.transcript().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role, Role::User);
    assert_eq!(turns[1].role, Role::Assistant);
    assert_eq!(turns[1].text, status_notice(500));
    assert!(!turns[1].has_classification());
}

#[tokio::test]
async fn timeout_appends_timeout_notice() {
    let url = serve_black_hole().await;
    let mut session = session_for(url, Some(Duration::from_millis(300)));

    session
        .send("hello", &mut NullRenderer)
        .await
        .expect("a timeout must not escape the submit path");

    let turns = session.transcript().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].text, TIMEOUT_NOTICE);
}

#[tokio::test]
async fn connection_refused_appends_transport_notice() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut session = session_for(format!("http://{addr}/message"), None);
    session
        .send("hello", &mut NullRenderer)
        .await
        .expect("a transport error must not escape the submit path");

    let turns = session.transcript().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].text, TRANSPORT_NOTICE);
}

#[tokio::test]
async fn malformed_reply_appends_transport_notice() {
    let url = serve_once("200 OK", "this is not json").await;
    let mut session = session_for(url, None);

    session.send("hello", &mut NullRenderer).await.unwrap();

    let turns = session.transcript().turns();
    assert_eq!(turns.len(), 2);
    // The decode failure is logged, not echoed; the transcript gets the
    // generic notice.
    assert_eq!(turns[1].text, TRANSPORT_NOTICE);
}

#[tokio::test]
async fn missing_response_field_falls_back() {
    let url = serve_once("200 OK", r#"{"ai_reason":""}"#).await;
    let mut session = session_for(url, None);

    session.send("hello", &mut NullRenderer).await.unwrap();

    let turns = session.transcript().turns();
    assert_eq!(turns[1].text, FALLBACK_RESPONSE);
    // Empty reason string carries no classification.
    assert!(!turns[1].has_classification());
}

#[tokio::test]
async fn validation_failure_sends_nothing() {
    // No listener at all: a validation reject must never open a connection.
    let mut session = session_for("http://127.0.0.1:9/message".to_string(), None);
    session.set_mobile_number("");

    let err = session.send("hello", &mut NullRenderer).await.unwrap_err();
    assert!(err.is_validation());
    assert!(session.transcript().is_empty());
    assert_eq!(session.stats().total_requests, 0);
}
