use thiserror::Error;

pub type SmtpResult<T> = Result<T, SmtpError>;

/// Errors raised while preparing or relaying a message.
///
/// The first error of any kind aborts the remaining command sequence, so a
/// message is either fully delivered through `QUIT` or failed.
#[derive(Error, Debug)]
pub enum SmtpError {
    /// Required fields were missing at send time. Raised before any network I/O.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The TCP connection to the relay could not be established.
    #[error("Connection failed: {0}")]
    Connection(std::io::Error),

    /// The connection broke while writing a command or reading a reply.
    #[error("Transport error: {0}")]
    Transport(std::io::Error),

    /// The server answered a command with an unexpected reply code.
    /// Carries the raw server text for diagnostics.
    #[error("Unexpected server reply (expected {expected}): {reply}")]
    Protocol { expected: u16, reply: String },
}
