//! Line-delimited JSON event feed.
//!
//! The feed is the protocol client shipped with the binary: it reads one
//! JSON document per line from stdin or a file and drives a
//! [`SessionEventHandler`]. Two line shapes are understood:
//!
//! - tagged messages: `{"type":"ready"}`, `{"type":"close"}` and
//!   `{"type":"event","uri":...,"eventType":...,"data":...}`
//! - raw client websocket event frames:
//!   `[8, "OnJsonApiEvent", {"uri":...,"eventType":...,"data":...}]`
//!
//! Unreadable lines are logged and skipped.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, info, warn};

use super::event::{ConnectionHandle, SessionEvent};
use super::handler::SessionEventHandler;
use crate::error::BridgeError;
use crate::Result;

/// Opcode of an event frame in the client's websocket protocol.
const WAMP_EVENT_OPCODE: u64 = 8;

/// Where feed lines are read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedSource {
    #[default]
    Stdin,
    File(PathBuf),
}

impl FeedSource {
    /// Interpret a CLI value; `-` means stdin.
    pub fn from_arg(path: Option<&Path>) -> Self {
        match path {
            Some(path) if path != Path::new("-") => FeedSource::File(path.to_path_buf()),
            _ => FeedSource::Stdin,
        }
    }

    pub fn label(&self) -> String {
        match self {
            FeedSource::Stdin => "stdin".to_string(),
            FeedSource::File(path) => path.display().to_string(),
        }
    }
}

/// One decoded feed line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedMessage {
    Ready,
    Close,
    Event(SessionEvent),
}

impl FeedMessage {
    /// Decode a line. Returns `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(line).map_err(|e| e.to_string())?;
        if let Value::Array(frame) = value {
            return Self::from_frame(frame).map(Some);
        }

        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| e.to_string())
    }

    fn from_frame(mut frame: Vec<Value>) -> std::result::Result<Self, String> {
        let opcode = frame.first().and_then(Value::as_u64);
        if opcode != Some(WAMP_EVENT_OPCODE) || frame.len() < 3 {
            return Err(format!("unsupported frame (opcode {:?})", opcode));
        }

        serde_json::from_value(frame.swap_remove(2))
            .map(FeedMessage::Event)
            .map_err(|e| e.to_string())
    }
}

/// Counters reported when a feed ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub lines: u64,
    pub dispatched: u64,
    pub skipped: u64,
}

/// Reads feed lines and dispatches them to a handler.
pub struct EventFeed<R> {
    reader: R,
    source: String,
    next_connection: u64,
    connection: Option<ConnectionHandle>,
}

impl EventFeed<BufReader<Box<dyn AsyncRead + Unpin + Send>>> {
    /// Open the given source for reading.
    pub async fn open(source: &FeedSource) -> Result<Self> {
        let reader: Box<dyn AsyncRead + Unpin + Send> = match source {
            FeedSource::Stdin => Box::new(tokio::io::stdin()),
            FeedSource::File(path) => {
                let file = tokio::fs::File::open(path).await.map_err(|e| {
                    BridgeError::Feed(format!("cannot open {}: {}", path.display(), e))
                })?;
                Box::new(file)
            }
        };

        Ok(Self::new(BufReader::new(reader), source.label()))
    }
}

impl<R: AsyncBufRead + Unpin> EventFeed<R> {
    pub fn new(reader: R, source: impl Into<String>) -> Self {
        Self {
            reader,
            source: source.into(),
            next_connection: 1,
            connection: None,
        }
    }

    /// Dispatch every line until the input ends.
    ///
    /// A connection still open at end of input is closed, since nothing
    /// will report on it anymore.
    pub async fn run<H>(mut self, handler: &H) -> Result<FeedStats>
    where
        H: SessionEventHandler + ?Sized,
    {
        info!(source = %self.source, "Reading client events");

        let mut stats = FeedStats::default();
        let mut line = String::new();

        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .await
                .map_err(|e| BridgeError::Feed(format!("{}: {}", self.source, e)))?;
            if read == 0 {
                break;
            }
            stats.lines += 1;

            match FeedMessage::parse(&line) {
                Ok(Some(message)) => {
                    self.dispatch(message, handler);
                    stats.dispatched += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(source = %self.source, line = stats.lines, "Skipping feed line: {}", e);
                    stats.skipped += 1;
                }
            }
        }

        if let Some(connection) = self.connection.take() {
            handler.on_close(&connection);
        }

        info!(
            source = %self.source,
            lines = stats.lines,
            dispatched = stats.dispatched,
            skipped = stats.skipped,
            "Event feed ended"
        );
        Ok(stats)
    }

    fn dispatch<H>(&mut self, message: FeedMessage, handler: &H)
    where
        H: SessionEventHandler + ?Sized,
    {
        match message {
            FeedMessage::Ready => {
                let connection = ConnectionHandle::new(self.next_connection, self.source.clone());
                self.next_connection += 1;
                handler.on_ready(&connection);
                self.connection = Some(connection);
            }
            FeedMessage::Close => {
                let connection = self.connection.take().unwrap_or_else(|| self.detached());
                handler.on_close(&connection);
            }
            FeedMessage::Event(event) => {
                let connection = self.connection.clone().unwrap_or_else(|| self.detached());
                debug!(%connection, uri = %event.uri, "Dispatching event");
                handler.on_session_event(&connection, &event);
            }
        }
    }

    // Events seen outside any handshake get connection id 0.
    fn detached(&self) -> ConnectionHandle {
        ConnectionHandle::new(0, self.source.clone())
    }
}
