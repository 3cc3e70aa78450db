//! Wires the queues, `bus_task`, and `poll_task` together and hands
//! the integration layer a `Handle` plus the receiving end of the
//! `to-integration` queue.

use std::time::Duration;

use pentair_api::{BusIo, Config};

use crate::bus_task::BusTask;
use crate::handle::Handle;
use crate::poll_task::PollTask;
use crate::queues::{self, Receiver};

/// Spawns `bus_task` and `poll_task` on the current Tokio runtime and
/// returns the integration layer's two handles: a cloneable `Handle`
/// for snapshots and commands, and the `Receiver` half of
/// `to-integration` for draining decoded messages as they arrive.
pub fn spawn<IO: BusIo + 'static>(io: IO, config: Config) -> (Handle, Receiver) {
    let (to_bus_tx, to_bus_rx) = queues::channel(config.to_bus_capacity);
    let (to_integration_tx, to_integration_rx) = queues::channel(config.to_integration_capacity);

    let (bus_task, state_rx) = BusTask::new(io, &config, to_bus_rx, to_integration_tx);
    let poll_task = PollTask::new(to_bus_tx.clone(), Duration::from_millis(config.poll_interval_ms));

    tokio::spawn(bus_task.run());
    tokio::spawn(poll_task.run());

    (Handle::new(to_bus_tx, state_rx), to_integration_rx)
}
