//! Sync channel between a widget model and its remote view.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::mpsc;

use colorbar_common::{Format, ModuleConfig, Result, SyncConfig, SyncMessage, encode_message};

/// Receiving end of a sync channel, owned by the transport.
pub type CommReceiver = mpsc::UnboundedReceiver<SyncMessage>;

/// Create a JSON sync channel for widgets served by `module`.
pub fn channel(module: ModuleConfig) -> (Comm, CommReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Comm::new(tx, module, Format::Json), rx)
}

/// Create a sync channel with the module and wire format of `config`.
pub fn channel_from_config(config: &SyncConfig) -> (Comm, CommReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    tracing::debug!(
        module = %config.module.name,
        format = config.serialization.mime_type(),
        "Opened sync channel"
    );
    (Comm::new(tx, config.module.clone(), config.serialization), rx)
}

/// Sending end of a sync channel.
///
/// Sends are fire-and-forget: they never block and never fail the caller.
/// Messages sent after the receiver is gone are logged and counted as dropped.
#[derive(Clone, Debug)]
pub struct Comm {
    tx: mpsc::UnboundedSender<SyncMessage>,
    module: ModuleConfig,
    format: Format,
    counters: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    sent: AtomicUsize,
    dropped: AtomicUsize,
}

impl Comm {
    pub fn new(
        tx: mpsc::UnboundedSender<SyncMessage>,
        module: ModuleConfig,
        format: Format,
    ) -> Self {
        Self {
            tx,
            module,
            format,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Front-end module announced in model identities.
    pub fn module(&self) -> &ModuleConfig {
        &self.module
    }

    /// Wire format the transport uses for this channel.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Encode a queued message in this channel's wire format.
    ///
    /// Called by the transport after taking a message off the receiver.
    pub fn encode(&self, message: &SyncMessage) -> Result<Vec<u8>> {
        encode_message(message, self.format)
    }

    /// Whether the receiving end has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Send a message to the remote view. Returns whether it was queued.
    pub fn send(&self, message: SyncMessage) -> bool {
        let model_id = message.model_id.clone();
        let method = message.method;

        match self.tx.send(message) {
            Ok(()) => {
                self.counters.sent.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(model_id = %model_id, method = %method, "Queued sync message");
                true
            }
            Err(_) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    model_id = %model_id,
                    method = %method,
                    "Sync channel closed, dropping message"
                );
                false
            }
        }
    }

    /// Counters shared by all clones of this comm.
    pub fn stats(&self) -> SendStats {
        SendStats {
            sent: self.counters.sent.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Statistics of a sync channel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SendStats {
    /// Messages queued for the remote view.
    pub sent: usize,
    /// Messages dropped because the receiver was gone.
    pub dropped: usize,
}

impl SendStats {
    /// Total number of attempted sends.
    pub fn total(&self) -> usize {
        self.sent + self.dropped
    }

    /// Delivery rate as a percentage.
    pub fn delivery_rate(&self) -> f64 {
        if self.total() == 0 {
            100.0
        } else {
            (self.sent as f64 / self.total() as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorbar_common::{ModelId, decode_message, detect_format, parse_config};

    #[test]
    fn test_send_and_receive() {
        let (comm, mut rx) = channel(ModuleConfig::default());
        assert!(comm.send(SyncMessage::close(ModelId::from("m1"))));

        let msg = rx.try_recv().unwrap();
        assert_eq!(msg.model_id.as_str(), "m1");
        assert_eq!(comm.stats().sent, 1);
    }

    #[test]
    fn test_closed_receiver_drops() {
        let (comm, rx) = channel(ModuleConfig::default());
        drop(rx);

        assert!(comm.is_closed());
        assert!(!comm.send(SyncMessage::close(ModelId::from("m1"))));
        assert_eq!(
            comm.stats(),
            SendStats {
                sent: 0,
                dropped: 1
            }
        );
    }

    #[test]
    fn test_plain_channel_encodes_json() {
        let (comm, mut rx) = channel(ModuleConfig::default());
        comm.send(SyncMessage::close(ModelId::from("m1")));

        let bytes = comm.encode(&rx.try_recv().unwrap()).unwrap();
        assert_eq!(comm.format(), Format::Json);
        assert_eq!(bytes, br#"{"model_id":"m1","method":"close"}"#);
    }

    #[test]
    fn test_cbor_config_produces_cbor() {
        let config: SyncConfig = parse_config(r#"{ serialization: "cbor" }"#).unwrap();
        let (comm, mut rx) = channel_from_config(&config);
        comm.send(SyncMessage::update(ModelId::from("m1"), Default::default()).with_field("length", 150));

        let message = rx.try_recv().unwrap();
        let bytes = comm.encode(&message).unwrap();
        assert_eq!(comm.format(), Format::Cbor);
        assert_eq!(detect_format(&bytes), Format::Cbor);
        assert_eq!(decode_message(&bytes).unwrap(), message);
    }

    #[test]
    fn test_clones_share_counters() {
        let (comm, _rx) = channel(ModuleConfig::default());
        let other = comm.clone();
        other.send(SyncMessage::request_state(ModelId::from("m1")));

        assert_eq!(comm.stats().sent, 1);
    }

    #[test]
    fn test_send_stats() {
        let mut stats = SendStats::default();
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.delivery_rate(), 100.0);

        stats.sent = 8;
        stats.dropped = 2;
        assert_eq!(stats.total(), 10);
        assert_eq!(stats.delivery_rate(), 80.0);
    }
}
