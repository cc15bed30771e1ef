//! Fire-and-forget gesture notifications.
//!
//! Requests are queued to a background worker that POSTs a small JSON record
//! to the configured endpoint. The tick loop never waits on the result;
//! outcomes are only recorded for diagnostics and never retried.

use std::collections::HashMap;
use std::fmt;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::value::RawValue;
use std::sync::Arc;

use crate::config::NotifyConfig;
use crate::error::NotifyError;

/// Gesture reported to the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyKind {
    Clap,
    Bow,
}

impl NotifyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyKind::Clap => "clap",
            NotifyKind::Bow => "bow",
        }
    }
}

impl fmt::Display for NotifyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One queued notification
#[derive(Debug, Clone, PartialEq)]
pub struct NotifyRequest {
    pub url: String,
    pub kind: NotifyKind,
    /// Session clock at the moment of the gesture, in seconds
    pub time: f64,
}

#[derive(Serialize)]
struct Payload<'a> {
    source: &'a str,
    event: &'a str,
    time: Box<RawValue>,
}

/// Build `{"source":..,"event":..,"time":<seconds with 3 decimals>}`
pub fn build_payload(source: &str, kind: NotifyKind, time: f64) -> Result<String, NotifyError> {
    let time = if time.is_finite() { time } else { 0.0 };
    let time = RawValue::from_string(format!("{:.3}", time)).map_err(NotifyError::Encode)?;
    let payload = Payload {
        source,
        event: kind.as_str(),
        time,
    };
    serde_json::to_string(&payload).map_err(NotifyError::Encode)
}

/// Something that can deliver a JSON body to a URL
pub trait NotifyTransport: Send + 'static {
    /// POST `body` as `application/json`; returns the HTTP status on success
    fn post_json(&self, url: &str, body: &str) -> Result<u16, NotifyError>;
}

/// Blocking HTTP transport, run on the worker thread
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let user_agent = format!("gesture-slides/{}", env!("CARGO_PKG_VERSION"));
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(&user_agent)
            .build();
        Self { agent }
    }
}

impl NotifyTransport for UreqTransport {
    fn post_json(&self, url: &str, body: &str) -> Result<u16, NotifyError> {
        match self
            .agent
            .post(url)
            .set("Content-Type", "application/json")
            .send_string(body)
        {
            Ok(response) => Ok(response.status()),
            Err(ureq::Error::Status(code, response)) => Err(NotifyError::Status {
                code,
                message: response.status_text().to_string(),
            }),
            Err(ureq::Error::Transport(transport)) => {
                Err(NotifyError::Transport(transport.to_string()))
            }
        }
    }
}

/// How a notification ended
#[derive(Debug, Clone, PartialEq)]
pub enum NotifyOutcome {
    Success { code: u16 },
    Failed { code: Option<u16>, message: String },
    Dropped { reason: String },
}

/// Last outcome seen for one event kind
#[derive(Debug, Clone)]
pub struct NotifyRecord {
    pub outcome: NotifyOutcome,
    pub completed_at: Instant,
}

/// Counters and last outcomes, for diagnostics only
#[derive(Debug, Clone, Default)]
pub struct NotifyDiagnostics {
    pub queued: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub dropped: u64,
    pub last: HashMap<NotifyKind, NotifyRecord>,
}

impl NotifyDiagnostics {
    fn record(&mut self, kind: NotifyKind, outcome: NotifyOutcome) {
        match &outcome {
            NotifyOutcome::Success { .. } => self.succeeded += 1,
            NotifyOutcome::Failed { .. } => self.failed += 1,
            NotifyOutcome::Dropped { .. } => self.dropped += 1,
        }
        self.last.insert(
            kind,
            NotifyRecord {
                outcome,
                completed_at: Instant::now(),
            },
        );
    }

    pub fn last_outcome(&self, kind: NotifyKind) -> Option<&NotifyOutcome> {
        self.last.get(&kind).map(|record| &record.outcome)
    }
}

/// Anything that accepts notification requests without blocking
pub trait NotificationSink {
    fn notify(&self, request: NotifyRequest);
}

impl<T: NotificationSink + ?Sized> NotificationSink for &T {
    fn notify(&self, request: NotifyRequest) {
        (**self).notify(request)
    }
}

/// Queues notifications to a background worker
pub struct NotificationDispatcher {
    tx: Option<Sender<NotifyRequest>>,
    diagnostics: Arc<Mutex<NotifyDiagnostics>>,
    worker: Option<JoinHandle<()>>,
}

impl NotificationDispatcher {
    /// Create a dispatcher that posts over HTTP
    pub fn new(config: &NotifyConfig) -> Self {
        let transport = UreqTransport::new(Duration::from_millis(config.timeout_ms));
        Self::with_transport(config, transport)
    }

    /// Create a dispatcher with a custom transport
    pub fn with_transport<T: NotifyTransport>(config: &NotifyConfig, transport: T) -> Self {
        let (tx, rx) = bounded::<NotifyRequest>(config.queue_capacity.max(1));
        let diagnostics = Arc::new(Mutex::new(NotifyDiagnostics::default()));
        let worker_diagnostics = Arc::clone(&diagnostics);
        let source = config.source.clone();

        let worker = thread::spawn(move || {
            tracing::debug!("Notification worker started");

            while let Ok(request) = rx.recv() {
                let outcome = match build_payload(&source, request.kind, request.time)
                    .and_then(|body| transport.post_json(&request.url, &body))
                {
                    Ok(code) => {
                        tracing::debug!("Notified {} -> {} ({})", request.kind, request.url, code);
                        NotifyOutcome::Success { code }
                    }
                    Err(e) => {
                        tracing::warn!("Notification {} to {} failed: {}", request.kind, request.url, e);
                        NotifyOutcome::Failed {
                            code: e.status_code(),
                            message: e.to_string(),
                        }
                    }
                };
                worker_diagnostics.lock().record(request.kind, outcome);
            }

            tracing::debug!("Notification worker stopped");
        });

        Self {
            tx: Some(tx),
            diagnostics,
            worker: Some(worker),
        }
    }

    /// Queue a notification. Never blocks; a full queue drops the request.
    pub fn send(&self, request: NotifyRequest) {
        let kind = request.kind;
        let result = match &self.tx {
            Some(tx) => tx.try_send(request).map_err(|e| match e {
                TrySendError::Full(_) => NotifyError::QueueFull,
                TrySendError::Disconnected(_) => NotifyError::Disconnected,
            }),
            None => Err(NotifyError::Disconnected),
        };

        let mut diagnostics = self.diagnostics.lock();
        match result {
            Ok(()) => diagnostics.queued += 1,
            Err(e) => {
                tracing::warn!("Notification {} dropped: {}", kind, e);
                diagnostics.record(
                    kind,
                    NotifyOutcome::Dropped {
                        reason: e.to_string(),
                    },
                );
            }
        }
    }

    /// Snapshot of the counters and last outcomes
    pub fn diagnostics(&self) -> NotifyDiagnostics {
        self.diagnostics.lock().clone()
    }

    /// Stop accepting requests and wait for queued ones to finish
    pub fn shutdown(mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("Notification worker panicked");
            }
        }
    }
}

impl NotificationSink for NotificationDispatcher {
    fn notify(&self, request: NotifyRequest) {
        self.send(request);
    }
}

impl Drop for NotificationDispatcher {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain and exit on its own
        self.tx.take();
    }
}
