//! Test-only `BusIo` double that replays a fixed byte stream and
//! discards everything written to it. Shared by unit tests across
//! `framer`, `bus_task`, and friends.

#![cfg(test)]

use std::collections::VecDeque;

use async_trait::async_trait;
use pentair_api::io::TxFrame;
use pentair_api::{BusIo, Result};

pub struct MockIo {
    rx: Vec<u8>,
    pos: usize,
    pub tx: Vec<u8>,
    pub tx_enabled: bool,
    tx_queue: VecDeque<TxFrame>,
}

impl MockIo {
    pub fn new(rx: Vec<u8>) -> Self {
        MockIo { rx, pos: 0, tx: Vec::new(), tx_enabled: false, tx_queue: VecDeque::new() }
    }
}

#[async_trait]
impl BusIo for MockIo {
    async fn available(&mut self) -> Result<usize> {
        Ok(self.rx.len() - self.pos)
    }

    async fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        let remaining = self.rx.len() - self.pos;
        let n = remaining.min(dst.len());
        dst[..n].copy_from_slice(&self.rx[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    async fn write(&mut self, src: &[u8]) -> Result<usize> {
        self.tx.extend_from_slice(src);
        Ok(src.len())
    }

    async fn flush_tx(&mut self) -> Result<()> {
        Ok(())
    }

    async fn set_direction(&mut self, tx_enable: bool) -> Result<()> {
        self.tx_enabled = tx_enable;
        Ok(())
    }

    async fn enqueue_tx(&mut self, frame: TxFrame) -> Result<()> {
        self.tx_queue.push_back(frame);
        Ok(())
    }

    async fn dequeue_tx(&mut self) -> Result<Option<TxFrame>> {
        Ok(self.tx_queue.pop_front())
    }
}
