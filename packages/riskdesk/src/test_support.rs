//! Test helpers: a scripted in-process HTTP service and a controllable
//! analysis service.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex as StdMutex};

use futures::future::{BoxFuture, FutureExt};
use reqwest::StatusCode;
use riskdesk_core::AnalysisResponse;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, Mutex};

use crate::api::{AnalysisService, ClientError, PortfolioUpload};

/// The analysis payload used by the end-to-end scenarios.
pub fn sample_response_json() -> String {
    serde_json::json!({
        "portfolio_summary": {
            "positions": [{
                "asset_class": "Equity",
                "ticker": "AAPL",
                "name": "Apple Inc",
                "quantity": 100.0,
                "market_price": 150.0,
                "market_value": 15000.0,
                "sector": "Technology",
                "duration": 0.0,
                "rating": "NR",
                "liquidity_score": 95.0
            }],
            "total_value": 1000000,
            "as_of_date": "2024-01-31"
        },
        "exposure_report": {
            "by_asset_class": {"Equity": 0.6, "Bond": 0.4},
            "by_sector": {},
            "by_rating": {},
            "weighted_average_duration": 5.2,
            "liquidity_profile": 72.3,
            "concentration_alerts": ["Equity exposure exceeds 50%"]
        },
        "selected_scenarios": [{
            "name": "2008 Crash",
            "description": "Severe global recession with liquidity freeze.",
            "equity_shock": -0.3,
            "rate_shock": -100,
            "credit_spread_shock": 400,
            "liquidity_shock": 0.5
        }],
        "simulation_results": [{
            "scenario_name": "2008 Crash",
            "scenario_description": "Severe global recession with liquidity freeze.",
            "total_pnl": -150000,
            "percentage_loss": -0.15,
            "position_impacts": {},
            "shock_details": {"equity": -0.3}
        }],
        "risk_explanation": "Analysis complete. Found 1 concentration alerts."
    })
    .to_string()
}

pub fn sample_response() -> AnalysisResponse {
    AnalysisResponse::from_json_slice(sample_response_json().as_bytes()).unwrap()
}

/// Base URL of a port nothing listens on.
pub async fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

/// Minimal HTTP/1.1 responder that answers each connection with the next
/// scripted `(status, body)` pair and records the raw requests.
pub struct MockService {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockService {
    pub async fn start(responses: Vec<(u16, String)>) -> Self {
        let replies = responses
            .into_iter()
            .map(|(status, body)| (status, None, body))
            .collect();
        Self::serve(replies).await
    }

    /// Like [`start`](Self::start), but each reply carries its own reason phrase.
    pub async fn start_with_reasons(responses: Vec<(u16, &'static str, String)>) -> Self {
        let replies = responses
            .into_iter()
            .map(|(status, reason, body)| (status, Some(reason), body))
            .collect();
        Self::serve(replies).await
    }

    async fn serve(replies: Vec<(u16, Option<&'static str>, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        tokio::spawn(async move {
            for (status, reason, body) in replies {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let request = read_request(&mut socket).await;
                recorded.lock().await.push(request);
                write_response(&mut socket, status, reason, &body).await;
            }
        });

        Self { addr, requests }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
        if request_complete(&buffer) {
            break;
        }
    }

    String::from_utf8_lossy(&buffer).into_owned()
}

fn request_complete(buffer: &[u8]) -> bool {
    let Some(header_end) = buffer.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let headers = String::from_utf8_lossy(&buffer[..header_end]).to_lowercase();
    let body = &buffer[header_end + 4..];

    if let Some(length) = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
    {
        return body.len() >= length;
    }
    if headers.contains("transfer-encoding: chunked") {
        return body.ends_with(b"0\r\n\r\n");
    }
    true
}

async fn write_response(socket: &mut TcpStream, status: u16, reason: Option<&str>, body: &str) {
    let reason = reason
        .or_else(|| StatusCode::from_u16(status).ok().and_then(|s| s.canonical_reason()))
        .unwrap_or("Unknown");
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

type Outcome = Result<AnalysisResponse, ClientError>;

/// Analysis service whose calls resolve only when the test says so.
///
/// Each expected file name gets one slot; the matching sender resolves the
/// call made for that file.
pub struct ScriptedService {
    pending: StdMutex<HashMap<String, oneshot::Receiver<Outcome>>>,
    uploads: Arc<StdMutex<Vec<String>>>,
}

impl ScriptedService {
    /// Create a service expecting one call per file name, plus the senders
    /// that resolve them, in the same order.
    pub fn new(file_names: &[&str]) -> (Self, Vec<oneshot::Sender<Outcome>>) {
        let mut senders = Vec::with_capacity(file_names.len());
        let mut pending = HashMap::with_capacity(file_names.len());
        for name in file_names {
            let (tx, rx) = oneshot::channel();
            senders.push(tx);
            pending.insert(name.to_string(), rx);
        }
        let service = Self {
            pending: StdMutex::new(pending),
            uploads: Arc::new(StdMutex::new(Vec::new())),
        };
        (service, senders)
    }

    /// File names seen so far, shared with the test.
    pub fn uploads(&self) -> Arc<StdMutex<Vec<String>>> {
        Arc::clone(&self.uploads)
    }
}

impl AnalysisService for ScriptedService {
    fn analyze(&self, upload: PortfolioUpload) -> BoxFuture<'static, Outcome> {
        let slot = self.pending.lock().unwrap().remove(&upload.file_name);
        self.uploads.lock().unwrap().push(upload.file_name);
        async move {
            match slot {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ClientError::Network("script dropped".to_string()))),
                None => Err(ClientError::Network("no scripted outcome".to_string())),
            }
        }
        .boxed()
    }
}
