//! WebSocket IPC bridge between the console and the operator UI.
//!
//! The server runs on its own thread with a current-thread Tokio runtime and
//! talks to Bevy over unbounded channels. Bevy systems queue outbound
//! messages in [`OutboundUiMessages`]; `flush_outbound_messages` drains them
//! each frame.

use bevy::prelude::*;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use shine_bevy::events::{ConsoleCommand, ConsoleErrorEvent, SnapshotUpdatedEvent};
use shine_bevy::resources::ConsoleState;

use crate::ipc::{ConsoleToUi, UiToConsole};

/// Resource holding messages to send to the UI.
#[derive(Resource, Default)]
pub struct OutboundUiMessages {
    messages: Vec<ConsoleToUi>,
}

impl OutboundUiMessages {
    /// Queue a message to send to the UI.
    pub fn send(&mut self, msg: ConsoleToUi) {
        self.messages.push(msg);
    }

    /// Drain all queued messages.
    pub fn drain(&mut self) -> Vec<ConsoleToUi> {
        std::mem::take(&mut self.messages)
    }
}

/// Resource holding the channel endpoints for WebSocket IPC.
#[derive(Resource)]
pub struct WsBridge {
    /// Console -> WebSocket server (-> UI).
    pub outbound_tx: mpsc::UnboundedSender<String>,
    /// WebSocket server -> console (<- UI).
    pub inbound_rx: mpsc::UnboundedReceiver<String>,
}

/// Bind `127.0.0.1:{port}` and serve it on a dedicated thread.
///
/// Binding happens on the caller's thread so a busy port is reported here.
/// One client is served at a time; when it disconnects the next one is
/// accepted.
pub fn spawn_ws_server(port: u16) -> std::io::Result<WsBridge> {
    let listener = std::net::TcpListener::bind(("127.0.0.1", port))?;
    listener.set_nonblocking(true)?;
    let addr = listener.local_addr()?;

    let (console_to_ws_tx, mut console_to_ws_rx) = mpsc::unbounded_channel::<String>();
    let (ws_to_console_tx, ws_to_console_rx) = mpsc::unbounded_channel::<String>();

    std::thread::Builder::new()
        .name("shine-ws".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::error!("Failed to build tokio runtime for WS bridge: {e}");
                    return;
                }
            };

            rt.block_on(async move {
                let listener = match tokio::net::TcpListener::from_std(listener) {
                    Ok(listener) => listener,
                    Err(e) => {
                        tracing::error!("Failed to register WebSocket listener: {e}");
                        return;
                    }
                };
                tracing::info!("WebSocket IPC server listening on ws://{addr}");

                loop {
                    let Ok((stream, peer)) = listener.accept().await else {
                        continue;
                    };
                    tracing::info!("WebSocket client connected: {peer}");

                    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
                        Ok(ws) => ws,
                        Err(e) => {
                            tracing::error!("WebSocket handshake failed: {e}");
                            continue;
                        }
                    };
                    let (mut ws_sink, mut ws_source) = ws_stream.split();

                    // Messages queued while no client was connected are stale.
                    while console_to_ws_rx.try_recv().is_ok() {}

                    loop {
                        tokio::select! {
                            incoming = ws_source.next() => match incoming {
                                Some(Ok(WsMessage::Text(text))) => {
                                    if ws_to_console_tx.send(text.to_string()).is_err() {
                                        return;
                                    }
                                }
                                Some(Ok(WsMessage::Close(_))) | Some(Err(_)) | None => break,
                                Some(Ok(_)) => {}
                            },
                            outgoing = console_to_ws_rx.recv() => match outgoing {
                                Some(json) => {
                                    if ws_sink.send(WsMessage::Text(json.into())).await.is_err() {
                                        break;
                                    }
                                }
                                None => return,
                            },
                        }
                    }

                    tracing::info!("WebSocket client disconnected: {peer}");
                }
            });
        })?;

    Ok(WsBridge {
        outbound_tx: console_to_ws_tx,
        inbound_rx: ws_to_console_rx,
    })
}

/// Bevy system: sends queued outbound messages over the WebSocket bridge.
pub fn flush_outbound_messages(mut outbound: ResMut<OutboundUiMessages>, bridge: Res<WsBridge>) {
    for msg in outbound.drain() {
        match serde_json::to_string(&msg) {
            Ok(json) => {
                let _ = bridge.outbound_tx.send(json);
            }
            Err(e) => tracing::error!("Failed to serialize ConsoleToUi: {e}"),
        }
    }
}

/// Bevy system: receives inbound UI messages and dispatches them as
/// `ConsoleCommand` messages.
///
/// `RequestState` is answered directly from the console snapshot.
pub fn poll_inbound_messages(
    mut bridge: ResMut<WsBridge>,
    state: Res<ConsoleState>,
    mut commands: MessageWriter<ConsoleCommand>,
    mut outbound: ResMut<OutboundUiMessages>,
) {
    while let Ok(json) = bridge.inbound_rx.try_recv() {
        let msg = match serde_json::from_str::<UiToConsole>(&json) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("Failed to parse UI message: {e}");
                outbound.send(ConsoleToUi::Error {
                    message: format!("Unreadable message: {e}"),
                });
                continue;
            }
        };

        match msg.into_command() {
            Ok(Some(cmd)) => {
                commands.write(cmd);
            }
            Ok(None) => outbound.send(ConsoleToUi::Initialize {
                snapshot: state.console.snapshot(),
            }),
            Err(message) => {
                tracing::warn!("Rejected UI message: {message}");
                outbound.send(ConsoleToUi::Error { message });
            }
        }
    }
}

/// Bevy system: relays console notifications to the UI.
pub fn forward_console_events(
    mut updated: MessageReader<SnapshotUpdatedEvent>,
    mut errors: MessageReader<ConsoleErrorEvent>,
    mut outbound: ResMut<OutboundUiMessages>,
) {
    for event in updated.read() {
        outbound.send(ConsoleToUi::SnapshotUpdated {
            snapshot: event.snapshot.clone(),
        });
    }
    for event in errors.read() {
        outbound.send(ConsoleToUi::Error {
            message: event.message.clone(),
        });
    }
}
