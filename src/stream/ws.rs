//! axum WebSocket binding for the pollution stream.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tracing::debug;

use super::{stream_readings, PollutionUpdate, StreamExit, UpdateSink};
use crate::aqi::LiveMetricFacade;
use crate::error::StreamError;
use crate::metrics;

/// Sending half of an upgraded WebSocket.
pub struct WsSink {
    sender: SplitSink<WebSocket, Message>,
}

impl WsSink {
    /// Wrap the sending half of a socket.
    pub fn new(sender: SplitSink<WebSocket, Message>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl UpdateSink for WsSink {
    async fn send(&mut self, update: &PollutionUpdate) -> Result<(), StreamError> {
        let json = serde_json::to_string(update)?;
        self.sender
            .send(Message::Text(json))
            .await
            .map_err(|e| StreamError::SendFailed(e.to_string()))
    }

    async fn close(&mut self) {
        // Either side may already be gone; nothing useful to do on failure.
        let _ = self.sender.send(Message::Close(None)).await;
        let _ = self.sender.close().await;
    }
}

/// Resolves once the peer sends a close frame, errors, or the stream ends.
/// Other inbound frames are read and dropped.
async fn peer_closed(mut receiver: SplitStream<WebSocket>) {
    while let Some(frame) = receiver.next().await {
        match frame {
            Ok(Message::Close(frame)) => {
                debug!(frame = ?frame, "Peer sent close frame");
                break;
            }
            Ok(_) => continue,
            Err(e) => {
                debug!(error = %e, "WebSocket read error");
                break;
            }
        }
    }
}

/// Drive one upgraded pollution socket until it closes.
pub async fn pollution_socket(
    socket: WebSocket,
    facade: Arc<LiveMetricFacade>,
    city: String,
    interval: Duration,
) -> StreamExit {
    let _guard = metrics::track_stream();
    let (sender, receiver) = socket.split();

    stream_readings(
        &facade,
        &city,
        WsSink::new(sender),
        interval,
        peer_closed(receiver),
    )
    .await
}
