//! Polling loop for one streaming connection.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use super::{PollutionUpdate, UpdateSink};
use crate::aqi::LiveMetricFacade;
use crate::error::StreamError;

/// Why a stream loop ended.
#[derive(Debug)]
pub enum StreamExit {
    /// The peer closed the connection.
    PeerClosed,
    /// Sending an update failed.
    SendFailed(StreamError),
}

/// Resolve, push, sleep, repeat until the connection goes away.
///
/// `closed` resolves when the peer disconnects. It is raced against both the
/// resolution and the sleep, so the loop stops without waiting out the
/// interval. The sink is closed on every exit path.
#[instrument(skip(facade, sink, closed))]
pub async fn stream_readings<S, C>(
    facade: &LiveMetricFacade,
    location: &str,
    mut sink: S,
    interval: Duration,
    closed: C,
) -> StreamExit
where
    S: UpdateSink,
    C: Future<Output = ()>,
{
    tokio::pin!(closed);

    let exit = loop {
        let reading = tokio::select! {
            biased;
            _ = &mut closed => break StreamExit::PeerClosed,
            reading = facade.resolve(location) => reading,
        };

        let update = PollutionUpdate::from(&reading);
        if let Err(e) = sink.send(&update).await {
            break StreamExit::SendFailed(e);
        }
        debug!(aqi = update.aqi, source = %reading.source, "Pushed AQI update");

        tokio::select! {
            biased;
            _ = &mut closed => break StreamExit::PeerClosed,
            _ = tokio::time::sleep(interval) => {}
        }
    };

    match &exit {
        StreamExit::PeerClosed => info!(city = %location, "Pollution stream closed by peer"),
        StreamExit::SendFailed(e) => warn!(city = %location, error = %e, "Pollution stream error"),
    }

    sink.close().await;
    exit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aqi::{MockSearchConfig, MockSearchProvider};
    use crate::stream::MockSink;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    const INTERVAL: Duration = Duration::from_secs(300);

    fn peer_close_signal(sink: &MockSink) -> (oneshot::Sender<()>, impl Future<Output = ()>) {
        let (tx, rx) = oneshot::channel::<()>();
        let sink = sink.clone();
        let closed = async move {
            let _ = rx.await;
            sink.mark_peer_closed();
        };
        (tx, closed)
    }

    #[tokio::test(start_paused = true)]
    async fn pushes_once_per_interval() {
        let sink = MockSink::new();
        let (_tx, closed) = peer_close_signal(&sink);
        let facade = LiveMetricFacade::offline();

        let task = tokio::spawn({
            let sink = sink.clone();
            async move { stream_readings(&facade, "Mumbai", sink, INTERVAL, closed).await }
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(sink.sent().len(), 1);

        tokio::time::sleep(INTERVAL).await;
        assert_eq!(sink.sent().len(), 2);

        let sent = sink.sent();
        assert!(sent.iter().all(|u| u.location == "Mumbai (Live)"));
        assert!(sent.iter().all(|u| (50..=250).contains(&u.aqi)));

        task.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn no_sends_after_peer_close() {
        let sink = MockSink::new();
        let (tx, closed) = peer_close_signal(&sink);
        let facade = LiveMetricFacade::offline();

        let task = tokio::spawn({
            let sink = sink.clone();
            async move { stream_readings(&facade, "Delhi", sink, INTERVAL, closed).await }
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(sink.sent().len(), 1);

        tx.send(()).unwrap();
        let exit = task.await.unwrap();
        assert!(matches!(exit, StreamExit::PeerClosed));

        // The sink errors on any send after the peer closed; none may arrive.
        tokio::time::sleep(INTERVAL * 3).await;
        assert_eq!(sink.sent().len(), 1);
        assert_eq!(sink.rejected_sends(), 0);
        assert_eq!(sink.close_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn close_interrupts_slow_resolution() {
        let sink = MockSink::new();
        let (tx, closed) = peer_close_signal(&sink);
        let mock = MockSearchProvider::with_config(MockSearchConfig {
            answer: Some("AQI 120".to_string()),
            latency_ms: 5_000,
            ..Default::default()
        });
        let facade = LiveMetricFacade::new(Some(Arc::new(mock)), Duration::from_secs(30));

        let task = tokio::spawn({
            let sink = sink.clone();
            async move { stream_readings(&facade, "Delhi", sink, INTERVAL, closed).await }
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        tx.send(()).unwrap();

        let exit = task.await.unwrap();
        assert!(matches!(exit, StreamExit::PeerClosed));
        assert!(sink.sent().is_empty());
        assert_eq!(sink.close_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn send_failure_ends_loop_and_closes() {
        let sink = MockSink::failing();
        let (_tx, closed) = peer_close_signal(&sink);
        let facade = LiveMetricFacade::offline();

        let exit = stream_readings(&facade, "Bangalore", sink.clone(), INTERVAL, closed).await;

        assert!(matches!(exit, StreamExit::SendFailed(_)));
        assert!(sink.sent().is_empty());
        assert_eq!(sink.close_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_close_handle_counts_as_closed() {
        let sink = MockSink::new();
        let (tx, closed) = peer_close_signal(&sink);
        drop(tx);
        let facade = LiveMetricFacade::offline();

        let exit = stream_readings(&facade, "Mumbai", sink.clone(), INTERVAL, closed).await;

        assert!(matches!(exit, StreamExit::PeerClosed));
        assert_eq!(sink.close_calls(), 1);
    }
}
