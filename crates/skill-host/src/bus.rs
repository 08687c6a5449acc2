//! Message bus

use crate::message::Message;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Fire-and-forget message emission
pub trait MessageBus: Send + Sync {
    /// Emit a message. Never blocks and never waits for a reply.
    fn emit(&self, message: Message);
}

/// In-process bus backed by an unbounded tokio channel
#[derive(Debug, Clone)]
pub struct ChannelBus {
    tx: mpsc::UnboundedSender<Message>,
}

impl ChannelBus {
    /// Create a bus and the receiver that drains it
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl MessageBus for ChannelBus {
    fn emit(&self, message: Message) {
        debug!("Emitting {}", message.msg_type);
        if let Err(e) = self.tx.send(message) {
            warn!("Bus receiver closed, dropped {}", e.0.msg_type);
        }
    }
}
