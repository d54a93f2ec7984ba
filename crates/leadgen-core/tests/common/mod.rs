//! Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use leadgen_core::{EmailDraft, EmailGeneration, GenerationError, Lead, WebhookError, WebhookForwarder};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub fn acme_lead() -> Lead {
    Lead::new("Acme Inc.", "John Doe", "john@acme.com", "https://acme.com", "B2B SaaS")
}

pub fn drafts(count: usize) -> Vec<EmailDraft> {
    (1..=count)
        .map(|i| EmailDraft::new(format!("Subject {}", i), format!("Body {}", i)))
        .collect()
}

/// Generator double that counts calls and replays a fixed outcome
pub struct MockGenerator {
    calls: AtomicUsize,
    reply: Result<Vec<EmailDraft>, GenerationError>,
    last_lead: Mutex<Option<Lead>>,
}

impl MockGenerator {
    pub fn returning(drafts: Vec<EmailDraft>) -> Self {
        Self::with_reply(Ok(drafts))
    }

    pub fn failing(error: GenerationError) -> Self {
        Self::with_reply(Err(error))
    }

    fn with_reply(reply: Result<Vec<EmailDraft>, GenerationError>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            reply,
            last_lead: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_lead(&self) -> Option<Lead> {
        self.last_lead.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailGeneration for MockGenerator {
    async fn generate(&self, lead: &Lead) -> Result<Vec<EmailDraft>, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_lead.lock().unwrap() = Some(lead.clone());
        self.reply.clone()
    }
}

/// Forwarder double that records what it was asked to send
pub struct MockForwarder {
    calls: AtomicUsize,
    reply: Result<(), WebhookError>,
    last: Mutex<Option<(String, Lead, Vec<EmailDraft>)>>,
}

impl MockForwarder {
    pub fn accepting() -> Self {
        Self::with_reply(Ok(()))
    }

    pub fn failing(error: WebhookError) -> Self {
        Self::with_reply(Err(error))
    }

    fn with_reply(reply: Result<(), WebhookError>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            reply,
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Option<(String, Lead, Vec<EmailDraft>)> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookForwarder for MockForwarder {
    async fn send(&self, url: &str, lead: &Lead, emails: &[EmailDraft]) -> Result<(), WebhookError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((url.to_string(), lead.clone(), emails.to_vec()));
        self.reply.clone()
    }
}

/// Serve exactly one HTTP response and hand back the raw request
pub async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{}", addr), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= pos + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

/// Split a raw request into lower-cased headers and the body
pub fn split_request(raw: &str) -> (String, String) {
    match raw.split_once("\r\n\r\n") {
        Some((head, body)) => (head.to_lowercase(), body.to_string()),
        None => (raw.to_lowercase(), String::new()),
    }
}

/// An address nothing is listening on
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
