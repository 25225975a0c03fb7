//! Common error types for network operations

/// A common error type for network operations.
///
/// This enum defines the failures the request clients can report. It is
/// designed to be simple and portable for `no_std` environments; every
/// variant collapses to the 0/false sentinel at the unified client boundary.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// An operation was attempted on a connection that is not open.
    NotOpen,
    /// The transport refused or failed to open the connection.
    ConnectFailed,
    /// An error occurred during a write operation.
    WriteError,
    /// No response byte arrived within the reply-wait budget.
    Timeout,
    /// No status code could be derived from the captured response bytes.
    MalformedResponse,
    /// The connection was closed by the peer mid-exchange.
    ConnectionClosed,
    /// The broker rejected the session (CONNACK return code 1-5).
    BrokerRefused,
    /// A protocol-level error occurred (bad packet, oversized frame).
    ProtocolError,
    /// The request configuration is structurally invalid.
    InvalidConfig,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::NotOpen => defmt::write!(f, "NotOpen"),
            Error::ConnectFailed => defmt::write!(f, "ConnectFailed"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::Timeout => defmt::write!(f, "Timeout"),
            Error::MalformedResponse => defmt::write!(f, "MalformedResponse"),
            Error::ConnectionClosed => defmt::write!(f, "ConnectionClosed"),
            Error::BrokerRefused => defmt::write!(f, "BrokerRefused"),
            Error::ProtocolError => defmt::write!(f, "ProtocolError"),
            Error::InvalidConfig => defmt::write!(f, "InvalidConfig"),
        }
    }
}
