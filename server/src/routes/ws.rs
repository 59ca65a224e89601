use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::{SinkExt, Stream, StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{session::Session, state::SharedState};

/// Upgrade the HTTP connection into a game session.
pub async fn ws_handler(
    State(state): State<SharedState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/ws", get(ws_handler))
}

/// Drive one connection until the browser goes away.
pub async fn handle_socket(state: SharedState, socket: WebSocket) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    let writer_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    let mut session = Session::new(state);
    info!("session opened");
    drive(&mut session, receiver, &outbound_tx).await;
    info!("session closed");
    finalize(writer_task, outbound_tx).await;
}

/// Feed inbound frames to the session until the peer closes. Control
/// frames are answered by the websocket layer itself.
pub(crate) async fn drive<S>(
    session: &mut Session,
    mut incoming: S,
    outbound_tx: &mpsc::UnboundedSender<Message>,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    while let Some(message) = incoming.next().await {
        match message {
            Ok(Message::Binary(bytes)) => {
                if session.on_frame(&bytes, outbound_tx).await.is_err() {
                    info!("writer closed, ending session");
                    break;
                }
            }
            Ok(Message::Text(text)) => {
                debug!(len = text.len(), "ignoring text frame");
            }
            Ok(Message::Close(_)) => break,
            Ok(Message::Ping(_) | Message::Pong(_)) => {}
            Err(err) => {
                warn!(error = %err, "websocket error");
                break;
            }
        }
    }
}

async fn finalize(writer_task: JoinHandle<()>, outbound_tx: mpsc::UnboundedSender<Message>) {
    drop(outbound_tx);
    let _ = writer_task.await;
}
