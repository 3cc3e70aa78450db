//! Fundamental error type shared by every layer of the bridge, from
//! the framer up through the integration boundary.

use std::fmt;
use tokio::sync::{mpsc, oneshot};

/// Enumerates the errors that can be reported by the bridge. These
/// are internal diagnostics -- per the bridge's contract with the
/// integration layer, none of them are surfaced as a failure of
/// `submit_command()` except a full to-bus queue, which is reported
/// as `QueueFull`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Error {
    /// A byte sequence didn't match either protocol's preamble, or
    /// the declared length/checksum was inconsistent. The framer
    /// discards the frame and resynchronizes.
    MalformedFrame(String),

    /// A decoded header's type byte has no row in the codec table, or
    /// the payload length didn't match the row. The packet is
    /// reclassified as `Ignore`.
    UnknownMessage(String),

    /// The bounded to-bus or to-integration queue was full when a
    /// message was enqueued.
    QueueFull,

    /// The peer end of a channel (bus task, integration layer) has
    /// dropped its handle.
    MissingPeer(String),

    /// A type or value fell outside what the operation accepts.
    InvArgument(String),

    /// An operation on the underlying UART failed or timed out.
    Io(String),

    /// A bad parameter was given in configuration, or a required
    /// parameter was missing.
    ConfigError(String),

    /// A precondition on a `Buffer` operation was violated. This
    /// indicates a programming error rather than a runtime condition;
    /// callers should treat it as fatal.
    BufferFault(&'static str),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedFrame(v) => write!(f, "malformed frame: {}", v),
            Error::UnknownMessage(v) => write!(f, "unknown message: {}", v),
            Error::QueueFull => write!(f, "queue is full"),
            Error::MissingPeer(v) => write!(f, "{} is missing peer", v),
            Error::InvArgument(v) => write!(f, "{}", v),
            Error::Io(v) => write!(f, "i/o error: {}", v),
            Error::ConfigError(v) => write!(f, "config error: {}", v),
            Error::BufferFault(v) => write!(f, "buffer precondition violated: {}", v),
        }
    }
}

// Lets code that sends requests over an `mpsc` channel and awaits the
// reply in a `oneshot` translate channel errors into a bridge error.

impl<T> From<mpsc::error::SendError<T>> for Error {
    fn from(_error: mpsc::error::SendError<T>) -> Self {
        Error::MissingPeer(String::from("request channel is closed"))
    }
}

impl From<oneshot::error::RecvError> for Error {
    fn from(_error: oneshot::error::RecvError) -> Self {
        Error::MissingPeer(String::from("request dropped"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
