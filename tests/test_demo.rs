mod common;

use std::io::Write;
use std::sync::Arc;

use common::exchange;
use httplet::config::{Config, StaticFile};
use httplet::demo::DemoHandler;

#[tokio::test]
async fn test_demo_get_renders_page() {
    let handler = Arc::new(DemoHandler::new(Vec::new()));

    let (response, outcome) =
        exchange(handler, Config::default(), b"GET /hello?x=1 HTTP/1.0\r\n\r\n").await;

    outcome.unwrap();
    assert!(response.starts_with(
        "HTTP/1.0 200 OK\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n"
    ));
    assert!(response.contains("<h1>test server</h1>"));
    assert!(response.contains("Current Time: "));
    assert!(response.contains("url : /hello?x=1"));
    assert!(response.contains("<form method=post action=/form>"));
}

#[tokio::test]
async fn test_demo_get_escapes_target() {
    let handler = Arc::new(DemoHandler::new(Vec::new()));

    let (response, _) =
        exchange(handler, Config::default(), b"GET /<script> HTTP/1.0\r\n\r\n").await;

    assert!(response.contains("url : /&lt;script&gt;"));
}

#[tokio::test]
async fn test_demo_post_echoes_body() {
    let handler = Arc::new(DemoHandler::new(Vec::new()));

    let (response, outcome) = exchange(
        handler,
        Config::default(),
        b"POST /form HTTP/1.0\r\nContent-Length: 25\r\n\r\nfoo=foovalue&bar=barvalue",
    )
    .await;

    outcome.unwrap();
    assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
    assert!(response.contains("<a href=/test>return</a><p>"));
    assert!(response.contains("postbody: <pre>foo=foovalue&amp;bar=barvalue</pre>"));
}

#[tokio::test]
async fn test_demo_serves_static_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"\x89PNG fake image").unwrap();

    let handler = Arc::new(DemoHandler::new(vec![StaticFile {
        route: "/Test.png".to_string(),
        path: file.path().to_path_buf(),
        content_type: "image/png".to_string(),
    }]));

    let (response, outcome) =
        exchange(handler, Config::default(), b"GET /Test.png HTTP/1.0\r\n\r\n").await;

    outcome.unwrap();
    assert_eq!(
        response,
        String::from_utf8_lossy(
            b"HTTP/1.0 200 OK\r\nContent-Type: image/png\r\nContent-Length: 15\r\nConnection: close\r\n\r\n\x89PNG fake image"
        )
    );
}

#[tokio::test]
async fn test_demo_missing_static_file_fails() {
    let handler = Arc::new(DemoHandler::new(vec![StaticFile {
        route: "/gone.png".to_string(),
        path: "/definitely/not/here.png".into(),
        content_type: "image/png".to_string(),
    }]));

    let (response, outcome) =
        exchange(handler, Config::default(), b"GET /gone.png HTTP/1.0\r\n\r\n").await;

    assert!(outcome.is_err());
    assert_eq!(response, "HTTP/1.0 404 File not found\r\nConnection: close\r\n\r\n");
}
