//! The contract the integration layer actually sees: a cheap,
//! cloneable handle that reads state snapshots and submits commands
//! without any visibility into the bus task's internals.

use pentair_api::Result;
use tokio::sync::watch;

use crate::message::Message;
use crate::queues::Sender;
use crate::state::State;

/// Obtained from [`crate::bridge::spawn`]. Cloning a `Handle` is
/// cheap: it shares the command queue and the state watch channel
/// with every other clone.
#[derive(Clone)]
pub struct Handle {
    to_bus: Sender,
    state_rx: watch::Receiver<State>,
}

impl Handle {
    pub(crate) fn new(to_bus: Sender, state_rx: watch::Receiver<State>) -> Self {
        Handle { to_bus, state_rx }
    }

    /// A self-contained copy of the current state. Never blocks: it
    /// reads whatever `bus_task` last published, however stale.
    pub fn get_state_snapshot(&self) -> State {
        *self.state_rx.borrow()
    }

    /// Enqueues a command for `bus_task`'s next transmit opportunity.
    /// The only failure mode is a full `to-bus` queue.
    pub fn submit_command(&self, msg: Message) -> Result<()> {
        self.to_bus.send(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Kind;
    use crate::queues;
    use pentair_api::Address;

    #[test]
    fn snapshot_reflects_latest_published_state() {
        let (_tx, rx) = queues::channel(1);
        let (state_tx, state_rx) = watch::channel(State::new());
        let handle = Handle::new(_tx, state_rx);
        drop(rx);

        assert!(!handle.get_state_snapshot().system.controller.valid);

        let mut s = State::new();
        s.system.controller.set(Address::new(0x10));
        state_tx.send_replace(s);

        assert!(handle.get_state_snapshot().system.controller.valid);
    }

    #[test]
    fn submit_command_reports_overflow() {
        let (tx, _rx) = queues::channel(1);
        let (_state_tx, state_rx) = watch::channel(State::new());
        let handle = Handle::new(tx, state_rx);

        let msg = Message::new(Address::new(0x21), Address::new(0x10), Kind::CtrlHeatReq);
        handle.submit_command(msg).unwrap();
        assert!(handle.submit_command(msg).is_err());
    }
}
