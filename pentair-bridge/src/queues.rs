//! The two bounded, single-producer single-consumer queues that
//! connect the bus task to the integration layer. Built on
//! `tokio::sync::mpsc` used in its single-consumer discipline;
//! enqueue never blocks and reports overflow instead.

use tokio::sync::mpsc;

use pentair_api::{Error, Result};

use crate::message::Message;

/// Producer half. `try_send` is the only way in: a full queue is an
/// overflow, not something the caller should wait out.
#[derive(Clone)]
pub struct Sender {
    inner: mpsc::Sender<Message>,
}

impl Sender {
    pub fn send(&self, msg: Message) -> Result<()> {
        self.inner.try_send(msg).map_err(|_| Error::QueueFull)
    }
}

pub struct Receiver {
    inner: mpsc::Receiver<Message>,
}

impl Receiver {
    /// Drains one message without waiting; `None` means the queue is
    /// currently empty.
    pub fn try_recv(&mut self) -> Option<Message> {
        self.inner.try_recv().ok()
    }

    pub async fn recv(&mut self) -> Option<Message> {
        self.inner.recv().await
    }
}

pub fn channel(capacity: usize) -> (Sender, Receiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (Sender { inner: tx }, Receiver { inner: rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pentair_api::Address;
    use crate::message::Kind;

    fn msg() -> Message {
        Message::new(Address::new(0x10), Address::new(0x0F), Kind::Ignore)
    }

    #[test]
    fn overflow_is_reported_not_blocked() {
        let (tx, _rx) = channel(1);
        tx.send(msg()).unwrap();
        assert_eq!(tx.send(msg()), Err(Error::QueueFull));
    }

    #[test]
    fn drains_in_fifo_order() {
        let (tx, mut rx) = channel(4);
        tx.send(Message::new(Address::new(0x10), Address::new(0x0F), Kind::Ignore)).unwrap();
        tx.send(Message::new(Address::new(0x21), Address::new(0x10), Kind::CtrlTimeReq)).unwrap();

        assert!(matches!(rx.try_recv().unwrap().kind, Kind::Ignore));
        assert!(matches!(rx.try_recv().unwrap().kind, Kind::CtrlTimeReq));
        assert!(rx.try_recv().is_none());
    }
}
