//! End-to-end tests against a served router.
//!
//! No provider credentials are configured, so every reading is synthetic and
//! no external network access is needed.

use std::net::SocketAddr;
use std::time::Duration;

use airpulse::advisory::AdvisoryService;
use airpulse::api::{create_router, AppState};
use airpulse::aqi::LiveMetricFacade;
use airpulse::config::Config;
use airpulse::stream::PollutionUpdate;
use futures::{SinkExt, Stream, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::{connect_async, tungstenite::Message};

async fn spawn_server(config: Config) -> SocketAddr {
    let state = AppState::new(config, LiveMetricFacade::offline(), AdvisoryService::new(None));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });

    addr
}

async fn next_update<S>(ws: &mut S) -> PollutionUpdate
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timed out waiting for update")
            .expect("stream ended")
            .expect("websocket error");

        if let Message::Text(text) = frame {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

#[tokio::test]
async fn pollution_stream_pushes_immediately() {
    let addr = spawn_server(Config::default()).await;

    let (mut ws, _) = connect_async(format!("ws://{addr}/ws/pollution?city=Delhi"))
        .await
        .unwrap();

    let update = next_update(&mut ws).await;
    assert_eq!(update.location, "Delhi (Live)");
    assert!((50..=250).contains(&update.aqi));

    let _ = ws.close(None).await;
}

#[tokio::test]
async fn pollution_stream_repeats_on_interval() {
    let config = Config {
        poll_interval_secs: 1,
        ..Config::default()
    };
    let addr = spawn_server(config).await;

    let (mut ws, _) = connect_async(format!("ws://{addr}/ws/pollution"))
        .await
        .unwrap();

    let first = next_update(&mut ws).await;
    let second = next_update(&mut ws).await;
    assert_eq!(first.location, "Mumbai (Live)");
    assert_eq!(second.location, "Mumbai (Live)");

    let _ = ws.close(None).await;
}

#[tokio::test]
async fn server_closes_after_client_close() {
    let addr = spawn_server(Config::default()).await;

    let (mut ws, _) = connect_async(format!("ws://{addr}/ws/pollution?city=Bangalore"))
        .await
        .unwrap();
    let _ = next_update(&mut ws).await;

    ws.send(Message::Close(None)).await.unwrap();

    // The server answers the close and ends the stream well before the next
    // 300s push would be due.
    let drained = tokio::time::timeout(Duration::from_secs(5), async {
        while let Some(frame) = ws.next().await {
            if frame.is_err() {
                break;
            }
        }
    })
    .await;
    assert!(drained.is_ok());
}
