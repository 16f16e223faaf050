//! Incremental delivery of a finished result set as typed events.

use ecostay_core::CanonicalHotel;
use futures::stream::{self, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const CHANNEL_CAPACITY: usize = 16;

/// One frame of a search response.
///
/// Serialized with a `type` tag, so a hotel frame is the flat hotel object
/// plus `"type": "hotel"` and the terminal frame is
/// `{"type": "complete", "total": N}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchEvent {
    Hotel(CanonicalHotel),
    Complete { total: usize },
}

/// Emits one [`SearchEvent::Hotel`] per input hotel in order, then exactly one
/// [`SearchEvent::Complete`] carrying the count.
///
/// Events are produced by a spawned task. Dropping the returned stream (for
/// example when the HTTP client disconnects) closes the channel and the
/// producer stops at its next send. Must be called inside a Tokio runtime.
pub fn stream_hotels(hotels: Vec<CanonicalHotel>) -> impl Stream<Item = SearchEvent> + Send {
    spawn_producer(hotels).0
}

/// Spawns the producer task. The handle resolves to the number of events the
/// task delivered before it exited.
fn spawn_producer(
    hotels: Vec<CanonicalHotel>,
) -> (impl Stream<Item = SearchEvent> + Send, JoinHandle<usize>) {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

    let producer = tokio::spawn(async move {
        let total = hotels.len();
        for (sent, hotel) in hotels.into_iter().enumerate() {
            if tx.send(SearchEvent::Hotel(hotel)).await.is_err() {
                tracing::debug!(sent, total, "search stream receiver dropped; stopping");
                return sent;
            }
        }
        if tx.send(SearchEvent::Complete { total }).await.is_err() {
            tracing::debug!(total, "search stream receiver dropped before completion");
            return total;
        }
        total + 1
    });

    let events = stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|event| (event, rx))
    });
    (events, producer)
}

/// Encodes one event as a newline-terminated JSON line.
///
/// # Errors
///
/// Returns the `serde_json` error if the event cannot be serialized.
pub fn ndjson_line(event: &SearchEvent) -> Result<String, serde_json::Error> {
    let mut line = serde_json::to_string(event)?;
    line.push('\n');
    Ok(line)
}

/// Maps an event stream onto NDJSON lines, ready to be used as a response body.
pub fn ndjson_stream<S>(events: S) -> impl Stream<Item = Result<String, serde_json::Error>> + Send
where
    S: Stream<Item = SearchEvent> + Send,
{
    events.map(|event| ndjson_line(&event))
}
