#![cfg(feature = "http")]

use std::time::Duration;

use ajudge::{
    CodeRequest, JudgeConfig, JudgeErrorKind, JudgeHttpTransport, JudgeTransport, ProblemId,
};
use futures_util::StreamExt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Accepts one connection, records the raw request, and writes `chunks` back
/// with a short pause between them before closing the socket.
async fn serve_once(chunks: Vec<String>) -> (String, JoinHandle<String>) {
    serve_then_stall(chunks, Duration::ZERO).await
}

/// Like `serve_once`, but keeps the socket silent for `stall` before closing.
async fn serve_then_stall(chunks: Vec<String>, stall: Duration) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let request = read_request(&mut socket).await;

        for chunk in chunks {
            socket.write_all(chunk.as_bytes()).await.expect("write");
            socket.flush().await.expect("flush");
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        tokio::time::sleep(stall).await;
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{address}"), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];

    loop {
        let read = socket.read(&mut chunk).await.expect("read");
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);

        let text = String::from_utf8_lossy(&buffer).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);

            if buffer.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buffer).to_string()
}

fn json_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn transport(base_url: &str) -> JudgeHttpTransport {
    let config = JudgeConfig::new(base_url)
        .with_request_timeout(Duration::from_secs(5))
        .with_stream_idle_timeout(Duration::from_secs(5));
    JudgeHttpTransport::from_config(config).expect("transport should build")
}

#[tokio::test]
async fn execute_posts_code_and_parses_ordered_results() {
    let body = r#"{"test_cases": [
        {"test_result": {"result": "Fizz", "passed": true}},
        {"test_result": {"result": "5", "passed": false}}
    ]}"#;
    let (base_url, server) = serve_once(vec![json_response("200 OK", body)]).await;

    let results = transport(&base_url)
        .execute(CodeRequest::new("def solution(n): ...", ProblemId::new(1)))
        .await
        .expect("execute should succeed");

    assert_eq!(results.len(), 2);
    assert!(results[0].test_result.as_ref().expect("verdict").passed);
    assert!(!results[1].test_result.as_ref().expect("verdict").passed);

    let request = server.await.expect("server task");
    assert!(request.starts_with("POST /execute/ HTTP/1.1"));
    assert!(request.contains(r#""problem_id":1"#));
}

#[tokio::test]
async fn client_status_carries_server_detail() {
    let (base_url, _server) = serve_once(vec![json_response(
        "404 Not Found",
        r#"{"detail": "No test cases found for this problem"}"#,
    )])
    .await;

    let error = transport(&base_url)
        .fetch_test_cases(ProblemId::new(99))
        .await
        .expect_err("404 should fail");

    assert_eq!(error.kind, JudgeErrorKind::ClientStatus);
    assert_eq!(error.status, Some(404));
    assert!(!error.retryable);
    assert_eq!(error.message, "No test cases found for this problem");
}

#[tokio::test]
async fn find_similar_returns_score() {
    let (base_url, server) =
        serve_once(vec![json_response("200 OK", r#"{"similarity_score": 0.05}"#)]).await;

    let score = transport(&base_url)
        .find_similar(CodeRequest::new("x", ProblemId::new(2)))
        .await
        .expect("probe should succeed");

    assert_eq!(score, 0.05);
    let request = server.await.expect("server task");
    assert!(request.starts_with("POST /find_similar/ HTTP/1.1"));
}

#[tokio::test]
async fn hint_stream_yields_fragments_in_arrival_order() {
    let (base_url, server) = serve_once(vec![
        "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nConnection: close\r\n\r\n"
            .to_string(),
        "data: Try \n\n".to_string(),
        "data: sort".to_string(),
        "ing \n\ndata: first.\n\n".to_string(),
    ])
    .await;

    let transport = transport(&base_url);
    let mut stream = transport
        .open_hint_stream(CodeRequest::new("x", ProblemId::new(3)))
        .await
        .expect("stream should open");

    let mut fragments = Vec::new();
    while let Some(item) = stream.next().await {
        fragments.push(item.expect("fragment"));
    }

    assert_eq!(fragments, vec!["Try ", "sorting ", "first."]);
    let request = server.await.expect("server task");
    assert!(request.starts_with("POST /generate_hint/ HTTP/1.1"));
}

#[tokio::test]
async fn hint_stream_reports_dropped_connection_after_partial_output() {
    let (base_url, _server) = serve_once(vec![
        "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nContent-Length: 4096\r\n\r\n"
            .to_string(),
        "data: Try \n\n".to_string(),
    ])
    .await;

    let transport = transport(&base_url);
    let mut stream = transport
        .open_hint_stream(CodeRequest::new("x", ProblemId::new(3)))
        .await
        .expect("stream should open");

    assert_eq!(stream.next().await, Some(Ok("Try ".to_string())));
    let error = stream
        .next()
        .await
        .expect("an error item")
        .expect_err("connection dropped");
    assert_eq!(error.kind, JudgeErrorKind::Transport);
}

#[tokio::test]
async fn silent_hint_stream_times_out_after_idle_window() {
    let (base_url, _server) = serve_then_stall(
        vec![
            "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nContent-Length: 4096\r\n\r\n"
                .to_string(),
            "data: Try \n\n".to_string(),
        ],
        Duration::from_secs(3),
    )
    .await;

    let config = JudgeConfig::new(base_url)
        .with_request_timeout(Duration::from_secs(5))
        .with_stream_idle_timeout(Duration::from_millis(300));
    let transport = JudgeHttpTransport::from_config(config).expect("transport should build");
    let mut stream = transport
        .open_hint_stream(CodeRequest::new("x", ProblemId::new(3)))
        .await
        .expect("stream should open");

    assert_eq!(stream.next().await, Some(Ok("Try ".to_string())));
    let error = stream
        .next()
        .await
        .expect("an error item")
        .expect_err("stream went idle");
    assert_eq!(error.kind, JudgeErrorKind::Timeout);
    assert!(error.message.contains("idle"));
}

#[tokio::test]
async fn hint_stream_open_distinguishes_throttling_from_client_errors() {
    let (base_url, _server) =
        serve_once(vec![json_response("429 Too Many Requests", r#"{"detail": "busy"}"#)]).await;
    let error = match transport(&base_url)
        .open_hint_stream(CodeRequest::new("x", ProblemId::new(3)))
        .await
    {
        Ok(_) => panic!("429 should not open"),
        Err(error) => error,
    };
    assert_eq!(error.kind, JudgeErrorKind::RateLimited);
    assert!(error.retryable);

    let (base_url, _server) =
        serve_once(vec![json_response("422 Unprocessable Entity", r#"{"detail": "bad"}"#)]).await;
    let error = match transport(&base_url)
        .open_hint_stream(CodeRequest::new("x", ProblemId::new(3)))
        .await
    {
        Ok(_) => panic!("422 should not open"),
        Err(error) => error,
    };
    assert_eq!(error.kind, JudgeErrorKind::ClientStatus);
    assert!(!error.retryable);
}
