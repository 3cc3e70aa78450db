//! The 30-second sibling of `bus_task`: keeps the mirrored state from
//! going stale between controller broadcasts by periodically asking
//! for the snapshots that only arrive on request.

use std::time::Duration;

use pentair_api::Address;
use tracing::warn;

use crate::message::{Kind, Message};
use crate::queues::Sender;

/// Requests sent on every tick, addressed to the controller via the
/// same `Address(0)` sentinel `bus_task` resolves against the learned
/// address.
const REQUESTS: [Kind; 3] = [Kind::CtrlVersionReq, Kind::CtrlHeatReq, Kind::CtrlSchedReq];

pub struct PollTask {
    to_bus: Sender,
    interval: Duration,
}

impl PollTask {
    pub fn new(to_bus: Sender, interval: Duration) -> Self {
        PollTask { to_bus, interval }
    }

    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            self.poll_once();
        }
    }

    fn poll_once(&self) {
        for kind in REQUESTS {
            let msg = Message::new(Address::new(0), Address::new(0), kind);
            if let Err(e) = self.to_bus.send(msg) {
                warn!(error = %e, ?kind, "periodic poll request dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queues;

    #[test]
    fn poll_once_enqueues_the_three_refresh_requests() {
        let (tx, mut rx) = queues::channel(10);
        let task = PollTask::new(tx, Duration::from_secs(30));

        task.poll_once();

        assert!(matches!(rx.try_recv().unwrap().kind, Kind::CtrlVersionReq));
        assert!(matches!(rx.try_recv().unwrap().kind, Kind::CtrlHeatReq));
        assert!(matches!(rx.try_recv().unwrap().kind, Kind::CtrlSchedReq));
        assert!(rx.try_recv().is_none());
    }
}
