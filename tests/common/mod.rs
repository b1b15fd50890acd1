//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use install_router::config::RouterConfig;
use install_router::lifecycle::Shutdown;
use install_router::HttpServer;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A canned upstream response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status_line: String,
    headers: Vec<(String, String)>,
    body: String,
    delay: Duration,
}

impl MockResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status("200 OK", body)
    }

    /// `status_line` is the code and reason, e.g. "404 Not Found".
    pub fn status(status_line: &str, body: impl Into<String>) -> Self {
        Self {
            status_line: status_line.to_string(),
            headers: Vec::new(),
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Wait before sending anything back.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn render(&self) -> String {
        let mut out = format!("HTTP/1.1 {}\r\n", self.status_line);
        for (name, value) in &self.headers {
            out.push_str(&format!("{}: {}\r\n", name, value));
        }
        out.push_str(&format!(
            "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.body.len(),
            self.body
        ));
        out
    }
}

/// A script origin on a raw TCP listener that records every request head.
pub struct MockUpstream {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    /// Start an origin answering every request with `respond(path)`.
    pub async fn start<F>(respond: F) -> Self
    where
        F: Fn(&str) -> MockResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let respond = Arc::new(respond);

        let recorded = requests.clone();
        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((socket, _)) => {
                        let respond = respond.clone();
                        let recorded = recorded.clone();
                        tokio::spawn(async move {
                            serve_one(socket, respond.as_ref(), &recorded).await;
                        });
                    }
                    Err(_) => break,
                }
            }
        });

        Self { addr, requests }
    }

    /// Origin that always returns `response`.
    pub async fn fixed(response: MockResponse) -> Self {
        Self::start(move |_| response.clone()).await
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/scripts/", self.addr)
    }

    /// Raw request heads received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Request paths received so far.
    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|head| head.split_whitespace().nth(1).map(str::to_string))
            .collect()
    }
}

async fn serve_one<F>(mut socket: TcpStream, respond: &F, recorded: &Mutex<Vec<String>>)
where
    F: Fn(&str) -> MockResponse,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buf).to_string();
    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
    recorded.lock().unwrap().push(head);

    let response = respond(&path);
    tokio::time::sleep(response.delay).await;
    let _ = socket.write_all(response.render().as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// An address nothing is listening on.
pub fn refused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Default configuration pointed at `base_url`, bound to an ephemeral port.
pub fn test_config(base_url: &str) -> RouterConfig {
    let mut config = RouterConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.base_url = base_url.to_string();
    config
}

/// A router running on a real socket.
pub struct RunningRouter {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl RunningRouter {
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }
}

pub async fn spawn_router(config: RouterConfig) -> RunningRouter {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    RunningRouter { addr, shutdown }
}

/// Test client that never pools, so each request sees a fresh connection.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
