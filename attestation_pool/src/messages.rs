use std::sync::Arc;

use futures::channel::mpsc::{Receiver, Sender, UnboundedSender};
use log::debug;
use types::{phase0::containers::Attestation, preset::Preset};

/// Handle gossip publishes inbound attestations onto. The channel is bounded;
/// sends block once [`DEFAULT_BUFFER_SIZE`] attestations are waiting.
///
/// [`DEFAULT_BUFFER_SIZE`]: crate::DEFAULT_BUFFER_SIZE
#[allow(type_alias_bounds)]
pub type AttestationSender<P: Preset> = Sender<Arc<Attestation<P>>>;

#[allow(type_alias_bounds)]
pub(crate) type AttestationReceiver<P: Preset> = Receiver<Arc<Attestation<P>>>;

#[derive(Debug)]
pub enum ControlMessage {
    Stop,
}

impl ControlMessage {
    pub fn send(self, tx: &UnboundedSender<Self>) {
        if let Err(message) = tx.unbounded_send(self) {
            debug!("internal send failed because the receiver was dropped: {message:?}");
        }
    }
}
