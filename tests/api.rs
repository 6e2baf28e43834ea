//! End-to-end tests against a real server on an ephemeral port.
//!
//! Requests are written as raw HTTP/1.1 with `connection: close`, so each
//! response is read to EOF.

use std::net::SocketAddr;
use std::path::Path;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use usuarios::{Config, Error, UserRegistry, app, serve_listener};

struct TestServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), Error>>,
}

impl TestServer {
    async fn start(public_dir: &Path) -> Self {
        let config = Config {
            public_dir: public_dir.to_path_buf(),
            environment: "test".into(),
            ..Config::default()
        };
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown, rx) = oneshot::channel::<()>();
        let router = app::router(&config, UserRegistry::seeded());
        let handle = tokio::spawn(serve_listener(listener, router, async {
            let _ = rx.await;
        }));
        Self { addr, shutdown, handle }
    }

    async fn send(&self, method: &str, path: &str, body: Option<(&str, &str)>) -> Reply {
        let mut raw = format!("{method} {path} HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n");
        if let Some((content_type, body)) = body {
            raw.push_str(&format!("content-type: {content_type}\r\ncontent-length: {}\r\n", body.len()));
            raw.push_str("\r\n");
            raw.push_str(body);
        } else {
            raw.push_str("\r\n");
        }

        let mut stream = TcpStream::connect(self.addr).await.unwrap();
        stream.write_all(raw.as_bytes()).await.unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        Reply::parse(&String::from_utf8(buf).unwrap())
    }

    async fn json(&self, method: &str, path: &str, body: &str) -> Reply {
        self.send(method, path, Some(("application/json", body))).await
    }

    async fn stop(self) {
        self.shutdown.send(()).unwrap();
        self.handle.await.unwrap().unwrap();
    }
}

#[derive(Debug)]
struct Reply {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl Reply {
    fn parse(raw: &str) -> Self {
        let (head, body) = raw.split_once("\r\n\r\n").unwrap();
        let mut lines = head.lines();
        let status = lines.next().unwrap().split(' ').nth(1).unwrap().parse().unwrap();
        let headers = lines
            .filter_map(|l| l.split_once(':'))
            .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_owned()))
            .collect();
        Self { status, headers, body: body.to_owned() }
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

#[tokio::test]
async fn seeded_scenario_over_http() {
    let public = tempfile::tempdir().unwrap();
    let server = TestServer::start(public.path()).await;

    let reply = server.json("POST", "/api/users", r#"{"name":"Eddie"}"#).await;
    assert_eq!(reply.status, 201);
    assert_eq!(reply.body, r#"{"id":6,"name":"Eddie"}"#);
    assert_eq!(reply.header("location"), Some("/api/users/6"));
    assert_eq!(reply.header("content-type"), Some("application/json"));

    let reply = server.json("PUT", "/api/users/2", r#"{"name":"Aldo2"}"#).await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, r#"{"id":2,"name":"Aldo2"}"#);

    let reply = server.send("DELETE", "/api/users/3", None).await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, r#"{"id":3,"name":"Mac"}"#);

    let reply = server.send("GET", "/api/users/3", None).await;
    assert_eq!(reply.status, 404);
    assert_eq!(reply.body, "user not found");

    let reply = server.send("DELETE", "/api/users/3", None).await;
    assert_eq!(reply.status, 404);

    let reply = server.send("GET", "/api/users", None).await;
    assert_eq!(reply.status, 200);
    assert_eq!(
        reply.body,
        "<ul><li>1 - Jessica</li><li>2 - Aldo2</li><li>4 - Karen</li>\
         <li>5 - Chikis</li><li>6 - Eddie</li></ul>",
    );

    server.stop().await;
}

#[tokio::test]
async fn invalid_payloads_are_400_with_first_violation() {
    let public = tempfile::tempdir().unwrap();
    let server = TestServer::start(public.path()).await;

    for (body, message) in [
        (r#"{"name":""}"#, "\"name\" length must be at least 3 characters long"),
        (r#"{"name":"Al"}"#, "\"name\" length must be at least 3 characters long"),
        ("{}", "\"name\" is required"),
        (r#"{"name":7}"#, "\"name\" must be a string"),
        (r#"{"name":"Alberto","admin":true}"#, "\"admin\" is not allowed"),
        (r#"{"name":"Al","admin":true}"#, "\"name\" length must be at least 3 characters long"),
        (r#"{"admin":true}"#, "\"name\" is required"),
    ] {
        let reply = server.json("POST", "/api/users", body).await;
        assert_eq!(reply.status, 400, "{body}");
        assert_eq!(reply.body, message);
    }

    let reply = server.json("PUT", "/api/users/1", r#"{"name":"Jo"}"#).await;
    assert_eq!(reply.status, 400);
    let reply = server.send("GET", "/api/users/1", None).await;
    assert_eq!(reply.body, "<h1>1 - Jessica</h1>");

    server.stop().await;
}

#[tokio::test]
async fn form_bodies_are_accepted() {
    let public = tempfile::tempdir().unwrap();
    let server = TestServer::start(public.path()).await;

    let reply = server
        .send("POST", "/api/users", Some(("application/x-www-form-urlencoded", "name=Mar%C3%ADa")))
        .await;
    assert_eq!(reply.status, 201);
    assert_eq!(reply.body, r#"{"id":6,"name":"María"}"#);

    server.stop().await;
}

#[tokio::test]
async fn not_found_for_any_id_shape() {
    let public = tempfile::tempdir().unwrap();
    let server = TestServer::start(public.path()).await;

    for id in ["99", "abc", "-1"] {
        let path = format!("/api/users/{id}");
        assert_eq!(server.send("GET", &path, None).await.status, 404, "GET {id}");
        assert_eq!(server.json("PUT", &path, r#"{"name":"Nadie"}"#).await.status, 404, "PUT {id}");
        assert_eq!(server.send("DELETE", &path, None).await.status, 404, "DELETE {id}");
    }

    server.stop().await;
}

#[tokio::test]
async fn head_is_answered_on_get_routes() {
    let public = tempfile::tempdir().unwrap();
    let server = TestServer::start(public.path()).await;

    for path in ["/api/users", "/api/users/1"] {
        let reply = server.send("HEAD", path, None).await;
        assert_eq!(reply.status, 200, "HEAD {path}");
        assert_eq!(reply.header("content-type"), Some("text/html; charset=utf-8"));
        assert!(reply.body.is_empty());
    }
    assert_eq!(server.send("HEAD", "/api/users/42", None).await.status, 404);

    server.stop().await;
}

#[tokio::test]
async fn root_statics_and_method_errors() {
    let public = tempfile::tempdir().unwrap();
    std::fs::write(public.path().join("hello.txt"), "hola").unwrap();
    let server = TestServer::start(public.path()).await;

    let reply = server.send("GET", "/", None).await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, app::GREETING);

    let reply = server.send("GET", "/hello.txt", None).await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, "hola");
    assert_eq!(reply.header("content-type"), Some("text/plain; charset=utf-8"));

    assert_eq!(server.send("GET", "/../Cargo.toml", None).await.status, 404);
    assert_eq!(server.send("GET", "/missing.txt", None).await.status, 404);

    let reply = server.send("PATCH", "/api/users/1", None).await;
    assert_eq!(reply.status, 405);
    assert_eq!(reply.header("allow"), Some("DELETE, GET, HEAD, PUT"));

    let reply = server.send("PURGE", "/api/users", None).await;
    assert_eq!(reply.status, 405);
    assert_eq!(reply.header("allow"), Some("GET, HEAD, POST"));

    server.stop().await;
}
