use common::event::Event;
use fhe::EncryptedValueService;
use hackathon::Contract;
use tracing::info;

pub const EVENT_TARGET: &str = "hackathon::events";

/// Drain the contract's event log into the tracing output.
pub fn flush<S: EncryptedValueService>(contract: &mut Contract<S>) {
    for event in contract.take_events() {
        let generic = event.to_generic_event();
        info!(
            target: EVENT_TARGET,
            topic = %generic.topic,
            hackathon_id = event.hackathon_id(),
            payload = %generic.payload,
            "Contract event"
        );
    }
}
