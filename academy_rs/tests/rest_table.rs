//! RestTable against a loopback HTTP server that answers one request.

use academy::featured::featured_lectures_query;
use academy::schema::{LeadRecord, Platform, SpecialLecture};
use academy::table::{RestTable, TableError, fetch_rows, insert_row};
use pretty_assertions::assert_eq;
use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

struct Captured {
    head: String,
    body: String,
}

fn header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|pos| pos + 4)
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Serve one response, hand back the base url and the captured request.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let split = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = header_end(&buf) {
                break end;
            }
        };
        let head = String::from_utf8_lossy(&buf[..split]).to_string();
        let wanted = content_length(&head);
        while buf.len() - split < wanted {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let request_body = String::from_utf8_lossy(&buf[split..]).to_string();

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        Captured {
            head: head.to_ascii_lowercase(),
            body: request_body,
        }
    });
    (base, handle)
}

fn client() -> Client {
    Client::builder().no_proxy().build().unwrap()
}

fn lead() -> LeadRecord {
    LeadRecord {
        full_name: "Asha Verma".into(),
        phone: "9876543210".into(),
        email: "asha@example.com".into(),
        platform_preference: Platform::Android,
        source_page: "mobile-app-section".into(),
    }
}

#[tokio::test]
async fn insert_posts_a_json_array_with_minimal_return() {
    let (base, server) = serve_once("201 Created", "").await;
    let table = RestTable::with_client(client(), &base, "anon-key").unwrap();

    insert_row(&table, &lead()).await.unwrap();

    let request = server.await.unwrap();
    assert!(request.head.starts_with("post /rest/v1/app_interest "), "{}", request.head);
    assert!(request.head.contains("prefer: return=minimal"));
    assert!(request.head.contains("apikey: anon-key"));
    assert!(request.head.contains("authorization: bearer anon-key"));

    let rows: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
    assert_eq!(rows[0]["platform_preference"], "android");
    assert_eq!(rows[0]["source_page"], "mobile-app-section");
}

#[tokio::test]
async fn rejected_insert_surfaces_the_backend_message() {
    let (base, server) = serve_once(
        "400 Bad Request",
        r#"{"code":"23514","message":"new row violates check constraint","hint":null}"#,
    )
    .await;
    let table = RestTable::with_client(client(), &base, "anon-key").unwrap();

    let err = insert_row(&table, &lead()).await.unwrap_err();
    server.await.unwrap();

    match err {
        TableError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "new row violates check constraint");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn featured_select_decodes_lectures() {
    let (base, server) = serve_once(
        "200 OK",
        r#"[{
            "id": "9f1c",
            "expert_name": "Dr. Meera Nair",
            "expert_title": "Former Assistant Commissioner",
            "expert_credentials": "AIR 14",
            "expert_image_url": "https://cdn.example.com/meera.jpg",
            "topic": "SSC CGL: From Tier 1 to Posting",
            "description": "A candid walk through.",
            "key_takeaways": ["a", "b", "c", "d", "e"],
            "lecture_date": "2026-03-14T13:00:00+00:00",
            "duration_minutes": 90,
            "is_upcoming": true,
            "is_featured": true,
            "available_online": true,
            "registration_url": null
        }]"#,
    )
    .await;
    let table = RestTable::with_client(client(), &base, "anon-key").unwrap();

    let lectures: Vec<SpecialLecture> = fetch_rows(&table, &featured_lectures_query()).await.unwrap();

    let request = server.await.unwrap();
    assert!(request.head.starts_with(
        "get /rest/v1/special_lectures?select=*&is_featured=eq.true&is_upcoming=eq.true&order=lecture_date.asc "
    ));
    assert_eq!(lectures.len(), 1);
    let lecture = &lectures[0];
    assert_eq!(lecture.highlights().len(), 4);
    assert_eq!(lecture.date_label().as_deref(), Some("14 March 2026"));
    assert_eq!(lecture.time_label().as_deref(), Some("06:30 PM"));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let table = RestTable::with_client(client(), &base, "anon-key").unwrap();

    let err = insert_row(&table, &lead()).await.unwrap_err();

    assert!(matches!(err, TableError::Transport(_)), "{err:?}");
}
