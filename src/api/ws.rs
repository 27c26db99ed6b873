// WebSocket endpoint: one session per connection, processed strictly
// sequentially. A decision call suspends the session's loop, so at most
// one call is ever in flight per connection.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};

use super::AppState;
use crate::engine::session::Session;
use crate::llm::decision;
use crate::metrics;
use crate::protocol::ClientMessage;

/// WebSocket upgrade handler for the game session protocol.
pub async fn ws_session(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_session(socket, state))
}

async fn handle_session(mut socket: WebSocket, state: AppState) {
    let mut session = Session::new();
    let session_id = session.id();
    metrics::CONNECTED_SESSIONS.inc();
    tracing::info!(%session_id, "client connected");

    while let Some(frame) = socket.recv().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(%session_id, "websocket error: {e}");
                break;
            }
        };

        let text = match frame {
            Message::Text(text) => text,
            Message::Close(_) => break,
            // Pings are answered at the protocol layer.
            Message::Ping(_) | Message::Pong(_) => continue,
            Message::Binary(_) => {
                tracing::warn!(%session_id, "binary frame on a text protocol, closing");
                break;
            }
        };

        metrics::WS_MESSAGES_RECEIVED_TOTAL.inc();

        // An envelope that fails validation tears the session down; a
        // failed decision call only skips the cycle.
        let message: ClientMessage = match serde_json::from_str(&text) {
            Ok(message) => message,
            Err(e) => {
                metrics::MALFORMED_ENVELOPES_TOTAL.inc();
                tracing::warn!(%session_id, "malformed envelope, closing session: {e}");
                break;
            }
        };

        let Some(dispatch) = session.receive(message) else {
            continue;
        };

        tracing::debug!(
            %session_id,
            commands = dispatch.commands.len(),
            units = dispatch.snapshot.units.len(),
            "dispatching decision request"
        );

        let timer = metrics::DECISION_LATENCY_SECONDS.start_timer();
        let result =
            decision::request_orders(&state.decision, dispatch.snapshot, dispatch.commands).await;
        timer.observe_duration();

        match result {
            Ok(orders) => {
                metrics::DISPATCHES_TOTAL.with_label_values(&["ok"]).inc();
                let payload = match serde_json::to_string(&orders) {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::error!(%session_id, "failed to serialize orders: {e}");
                        continue;
                    }
                };
                if socket.send(Message::Text(payload.into())).await.is_err() {
                    // Client disconnected
                    break;
                }
            }
            Err(e) => {
                metrics::DISPATCHES_TOTAL
                    .with_label_values(&["failed"])
                    .inc();
                tracing::warn!(%session_id, "decision call failed, skipping cycle: {e}");
            }
        }
    }

    metrics::CONNECTED_SESSIONS.dec();
    tracing::info!(%session_id, "session closed");
}
