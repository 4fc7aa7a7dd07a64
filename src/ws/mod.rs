pub mod actor;
pub mod handler;

use tokio::sync::mpsc;

/// Type alias for the sender half of a WebSocket connection's channel.
/// The writer task owns the socket sink; everything else pushes frames
/// through this.
pub type ConnectionSender = mpsc::UnboundedSender<axum::extract::ws::Message>;
