//! The scheduler: a single cooperative loop that drives the framer,
//! applies decoded packets to the state snapshot, forwards messages
//! to the integration layer, and transmits queued commands during the
//! quiet window after a controller broadcast.

use std::time::Duration;

use pentair_api::io::{TxFrame, CHAR_TIME_US, TX_HOLD_CHAR_TIMES};
use pentair_api::{Address, BusIo, Config};
use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::buffer::{Buffer, CAPACITY};
use crate::codec;
use crate::framer::Framer;
use crate::message::{Kind, Message};
use crate::packet::Packet;
use crate::queues::{Receiver as ToBusReceiver, Sender as ToIntegrationSender};
use crate::state::State;
use crate::updater;

/// Owns the UART, the framer, and the canonical state snapshot.
/// `run` never returns under normal operation; it stops only if the
/// process itself shuts down or a peer queue is dropped.
pub struct BusTask<IO: BusIo> {
    io: IO,
    framer: Framer,
    state: State,
    state_tx: watch::Sender<State>,
    to_bus: ToBusReceiver,
    to_integration: ToIntegrationSender,
    tx_buf: Buffer,
    held_command: Option<Message>,
    tick: Duration,
    transmit_opportunity: bool,
}

impl<IO: BusIo> BusTask<IO> {
    /// Builds the task and the `watch` channel its `Handle` reads
    /// snapshots from. The caller is responsible for running the
    /// returned task on its executor.
    pub fn new(
        io: IO,
        config: &Config,
        to_bus: ToBusReceiver,
        to_integration: ToIntegrationSender,
    ) -> (Self, watch::Receiver<State>) {
        let (state_tx, state_rx) = watch::channel(State::new());
        let task = BusTask {
            io,
            framer: Framer::new(),
            state: State::new(),
            state_tx,
            to_bus,
            to_integration,
            tx_buf: Buffer::alloc(CAPACITY),
            held_command: None,
            tick: Duration::from_millis(config.tick_ms),
            transmit_opportunity: false,
        };
        (task, state_rx)
    }

    pub async fn run(mut self) {
        loop {
            self.step().await;
            tokio::time::sleep(self.tick).await;
        }
    }

    async fn step(&mut self) {
        self.accept_command().await;

        match self.framer.receive(&mut self.io).await {
            Ok(Some(pkt)) => {
                let msg = codec::decode(&pkt);
                self.handle_received(msg);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "bus read failed"),
        }

        if self.transmit_opportunity {
            self.transmit_opportunity = false;
            match self.io.dequeue_tx().await {
                Ok(Some(frame)) => self.transmit(frame).await,
                Ok(None) => {}
                Err(e) => warn!(error = %e, "tx queue dequeue failed"),
            }
        }
    }

    /// Pulls one command off `to-bus`, resolving its destination. A
    /// command addressed to the sentinel `Address(0)` means "the
    /// controller"; until an address has been learned it stays in
    /// `held_command` rather than being dropped, which keeps
    /// `to-bus`'s FIFO ordering intact for everything behind it.
    async fn accept_command(&mut self) {
        if self.held_command.is_none() {
            self.held_command = self.to_bus.try_recv();
        }

        let Some(msg) = self.held_command else { return };

        let Some(dst) = self.resolve_dst(msg.dst) else {
            return;
        };

        self.held_command = None;
        self.encode_command(Message::new(Address::new(pentair_api::address::REMOTE), dst, msg.kind)).await;
    }

    fn resolve_dst(&self, dst: Address) -> Option<Address> {
        if dst.raw() == 0 {
            self.state.system.controller.valid.then_some(self.state.system.controller.value)
        } else {
            Some(dst)
        }
    }

    async fn encode_command(&mut self, msg: Message) {
        let len = codec::encoded_len(&msg.kind);
        let mut raw = [0u8; crate::buffer::PAYLOAD_MAX];
        let (variant, typ) = codec::encode(&msg.kind, &mut raw[..len]);
        let payload = raw[..len].to_vec();

        Framer::encode_frame(&mut self.tx_buf, variant, msg.src, msg.dst, typ, &payload);

        let mut wire = Vec::with_capacity(Framer::preamble(variant).len() + self.tx_buf.len());
        wire.extend_from_slice(Framer::preamble(variant));
        wire.extend_from_slice(self.tx_buf.payload());

        let frame = TxFrame { wire, variant, src: msg.src, dst: msg.dst, typ, payload };
        if let Err(e) = self.io.enqueue_tx(frame).await {
            warn!(error = %e, "failed to enqueue command for transmission");
        }
    }

    fn handle_received(&mut self, msg: Message) {
        let previous = self.state;
        if let Err(e) = updater::apply(&msg, &mut self.state) {
            warn!(error = %e, "failed to apply message to state");
            return;
        }
        if self.state != previous {
            self.state_tx.send_replace(self.state);
        }

        if is_controller_broadcast(&msg) {
            trace!("transmit opportunity opened");
            self.transmit_opportunity = true;
        }

        if self.to_integration.send(msg).is_err() {
            warn!(kind = ?msg.kind, "to-integration queue full, dropping message");
        }
    }

    async fn transmit(&mut self, frame: TxFrame) {
        if let Err(e) = self.io.set_direction(true).await {
            warn!(error = %e, "failed to assert transmitter");
            return;
        }
        if let Err(e) = self.io.write(&frame.wire).await {
            warn!(error = %e, "bus write failed");
        }
        if let Err(e) = self.io.flush_tx().await {
            warn!(error = %e, "flush failed");
        }

        tokio::time::sleep(Duration::from_micros(CHAR_TIME_US * TX_HOLD_CHAR_TIMES)).await;

        if let Err(e) = self.io.set_direction(false).await {
            warn!(error = %e, "failed to release transmitter");
        }

        debug!(dst = %frame.dst, typ = frame.typ, "transmitted command");

        // Self-echo: the receive path is the only writer of state, so
        // decode what was just sent exactly as if it had arrived over
        // the wire, keeping the snapshot consistent without waiting
        // for the controller to broadcast it back.
        let pkt = Packet::new(frame.variant, frame.src, frame.dst, frame.typ, &frame.payload);
        let msg = codec::decode(&pkt);
        self.handle_received(msg);
    }
}

fn is_controller_broadcast(msg: &Message) -> bool {
    msg.src.is_controller() && msg.dst.is_broadcast()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queues;
    use crate::test_support::MockIo;
    use pentair_api::Config;

    fn test_config() -> Config {
        Config {
            rx_pin: 0,
            tx_pin: 0,
            direction_pin: 0,
            baud_rate: 9600,
            poll_interval_ms: 30_000,
            tick_ms: 100,
            to_bus_capacity: 6,
            to_integration_capacity: 10,
        }
    }

    fn a5_broadcast_frame() -> Vec<u8> {
        let mut frame = vec![0xFF, 0x00, 0xFF, 0xA5, 0x01, 0x0F, 0x10, 0x02, 0x1D];
        let payload = [
            0x09, 0x1F, 0x00, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x56,
            0x56, 0x02, 0x50, 0x00, 0x50, 0x4E, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        frame.extend_from_slice(&payload);
        let sum: u32 = 0xA5u32
            + [0x01u8, 0x0F, 0x10, 0x02, 0x1D].iter().map(|&b| b as u32).sum::<u32>()
            + payload.iter().map(|&b| b as u32).sum::<u32>();
        frame.push(((sum >> 8) & 0xFF) as u8);
        frame.push((sum & 0xFF) as u8);
        frame
    }

    #[tokio::test]
    async fn receiving_controller_broadcast_opens_transmit_opportunity() {
        let io = MockIo::new(a5_broadcast_frame());
        let (to_bus_tx, to_bus_rx) = queues::channel(6);
        let (to_int_tx, mut to_int_rx) = queues::channel(10);
        let (mut task, state_rx) = BusTask::new(io, &test_config(), to_bus_rx, to_int_tx);
        drop(to_bus_tx);

        task.step().await;

        assert!(task.transmit_opportunity);
        assert!(state_rx.borrow().system.controller.valid);
        assert_eq!(state_rx.borrow().system.controller.value, Address::new(0x10));
        assert!(to_int_rx.try_recv().is_some());
    }

    #[tokio::test]
    async fn command_is_held_until_controller_address_is_learned() {
        let io = MockIo::new(Vec::new());
        let (to_bus_tx, to_bus_rx) = queues::channel(6);
        let (to_int_tx, _to_int_rx) = queues::channel(10);
        let (mut task, _state_rx) = BusTask::new(io, &test_config(), to_bus_rx, to_int_tx);

        to_bus_tx
            .send(Message::new(Address::new(pentair_api::address::REMOTE), Address::new(0), Kind::CtrlHeatReq))
            .unwrap();

        task.accept_command().await;
        assert!(task.held_command.is_some());
        assert!(task.io.dequeue_tx().await.unwrap().is_none());
    }
}
