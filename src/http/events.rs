//! SSE refresh feed
//!
//! Streams "data changed for path X" events to the presentation layer.
//! Lagging consumers lose old events and recover by re-fetching.

use crate::app::AppState;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

/// Subscribe to refresh events
pub async fn subscribe(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.refresh.subscribe()).filter_map(|event| {
        event
            .ok()
            .map(|e| Ok::<Event, Infallible>(Event::default().event("refresh").data(e.path)))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
