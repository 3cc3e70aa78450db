//! Abstracts the half-duplex RS-485 transceiver so the framer and bus
//! task can be exercised without real hardware.

use async_trait::async_trait;

use crate::address::Address;
use crate::error::Result;

/// One character time at 9600 baud, 8-N-1 (10 bit times per
/// character): roughly 1.042 ms.
pub const CHAR_TIME_US: u64 = 1_042;

/// Minimum hold time after the last transmitted byte before the
/// direction line is released, expressed in character times. Covers
/// UARTs that report "buffer empty" one byte early.
pub const TX_HOLD_CHAR_TIMES: u64 = 2;

/// Which of the two on-wire protocols a frame belongs to. A plain
/// `A5` preamble match defaults to `A5Controller`; the header reader
/// reclassifies it to `A5Pump` once it sees a pump-group address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    A5Controller,
    A5Pump,
    Ic,
    None,
}

/// An already-encoded command, queued between the tick that accepted
/// it off the integration-facing queue and the tick that finds a
/// transmit opportunity. Carries the semantic fields alongside the
/// wire bytes so the caller can self-echo the command into state once
/// it's been sent, without waiting for the controller to broadcast it
/// back.
#[derive(Debug, Clone)]
pub struct TxFrame {
    pub wire: Vec<u8>,
    pub variant: Variant,
    pub src: Address,
    pub dst: Address,
    pub typ: u8,
    pub payload: Vec<u8>,
}

/// Capability set a driver must provide for the bus task to drive the
/// physical link. Implementors own the UART and the outgoing command
/// queue; the framer and bus task never touch hardware registers or
/// hold pending frames themselves.
#[async_trait]
pub trait BusIo: Send {
    /// Number of bytes immediately available to read without
    /// blocking.
    async fn available(&mut self) -> Result<usize>;

    /// Reads up to `dst.len()` bytes, returning the count actually
    /// read. Bounded by an implementation-defined timeout; a partial
    /// read (including zero bytes) is not an error, it's how the
    /// framer detects an exhausted receive window.
    async fn read(&mut self, dst: &mut [u8]) -> Result<usize>;

    /// Writes all of `src`, returning the count written. Short writes
    /// are possible and are left to the caller to retry.
    async fn write(&mut self, src: &[u8]) -> Result<usize>;

    /// Blocks until the UART's transmit FIFO has fully drained.
    async fn flush_tx(&mut self) -> Result<()>;

    /// Drives the direction-control line. `true` asserts the
    /// transmitter; `false` releases it back to the receiver after
    /// the bus task has already flushed and held for
    /// `TX_HOLD_CHAR_TIMES` character times.
    async fn set_direction(&mut self, tx_enable: bool) -> Result<()>;

    /// Queues an encoded command for transmission, in FIFO order.
    async fn enqueue_tx(&mut self, frame: TxFrame) -> Result<()>;

    /// Pops the next queued command, if any.
    async fn dequeue_tx(&mut self) -> Result<Option<TxFrame>>;
}
