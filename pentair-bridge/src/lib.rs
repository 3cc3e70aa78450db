//! The RS-485 bridge itself: frames and decodes the Pentair wire
//! protocols, mirrors pool state from observed traffic, and exposes a
//! small queue-based contract to whatever integration layer wants to
//! read that state or send commands.

mod bridge;
mod buffer;
mod bus_task;
mod codec;
mod framer;
mod handle;
mod message;
mod packet;
mod payload;
mod poll_task;
mod queues;
mod state;
#[cfg(test)]
mod test_support;
mod updater;

pub use bridge::spawn;
pub use handle::Handle;
pub use message::{Kind, Message};
pub use queues::Receiver as MessageReceiver;
pub use state::{
    Body, CalendarDate, ChlorStatus, Chlorinator, Circuit, CircuitState, Field, HeatSource, ModeFlags, Pump,
    Schedule, State, TempSensor, Thermostat, TimeOfDay, Version,
};
