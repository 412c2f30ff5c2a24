use std::io::{BufRead, BufReader, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use tracing::debug;

use crate::smtp::smtp_command::SmtpCommand;
use crate::smtp::smtp_error::{SmtpError, SmtpResult};
use crate::utils::error::Error;

/// One SMTP exchange with a relay server.
///
/// The session owns the connection for its whole lifetime and serves exactly
/// one send attempt: commands go out strictly in order, each reply must
/// carry the expected code, and the first mismatch or transport fault aborts
/// the rest of the sequence.
///
/// Generic over the transport so the protocol can be driven against any
/// blocking `Read + Write` stream.
pub struct SmtpSession<S> {
    stream: BufReader<S>,
}

impl SmtpSession<TcpStream> {
    /// Connects to the relay and consumes the server greeting.
    ///
    /// If a timeout is given it is applied as a deadline to every read and
    /// write on the connection. Without one, each exchange blocks until the
    /// peer responds or the transport errors out.
    pub fn connect(host: &str, port: u16, timeout: Option<Duration>) -> SmtpResult<Self> {
        let stream = TcpStream::connect((host, port)).map_err(SmtpError::Connection)?;
        stream.set_read_timeout(timeout).map_err(SmtpError::Connection)?;
        stream.set_write_timeout(timeout).map_err(SmtpError::Connection)?;
        Self::open(stream)
    }

    /// Releases the connection.
    ///
    /// After `QUIT` the server closes its side first, so a failing shutdown
    /// is tolerated rather than surfaced.
    pub fn close(self) {
        let _ = self.stream.get_ref().shutdown(Shutdown::Both);
    }
}

impl<S: Read + Write> SmtpSession<S> {
    /// Wraps an established transport and consumes the server greeting.
    pub fn open(stream: S) -> SmtpResult<Self> {
        let mut session = SmtpSession {
            stream: BufReader::new(stream),
        };
        let greeting = session.read_reply()?;
        debug!("< {greeting}");
        Ok(session)
    }

    /// Executes the commands strictly in order, stopping at the first failure.
    pub fn run(&mut self, commands: &[SmtpCommand]) -> SmtpResult<()> {
        for command in commands {
            self.send_command(command)?;
        }
        Ok(())
    }

    /// Writes one command and validates the reply code.
    ///
    /// The reply is read line-buffered, folding `NNN-` continuation lines
    /// into one reply, and trimmed of trailing whitespace. The leading
    /// digits must match the expected code; a matching code is a success
    /// with no further meaning extracted from the reply.
    pub fn send_command(&mut self, command: &SmtpCommand) -> SmtpResult<()> {
        debug!("> {command}");
        self.stream.get_mut().write_all(command.payload()).map_err(SmtpError::Transport)?;
        self.stream.get_mut().flush().map_err(SmtpError::Transport)?;

        let reply = self.read_reply()?;
        debug!("< {reply}");
        if reply.starts_with(&command.expect().to_string()) {
            Ok(())
        } else {
            Err(SmtpError::Protocol {
                expected: command.expect(),
                reply,
            })
        }
    }

    fn read_reply(&mut self) -> SmtpResult<String> {
        let mut reply = String::new();
        loop {
            let mut line = String::new();
            let bytes = self.stream.read_line(&mut line).map_err(SmtpError::Transport)?;
            if bytes == 0 {
                return Err(SmtpError::Transport(Error::std_io("connection closed by server")));
            }
            reply.push_str(&line);
            // A dash after the code marks a continuation line.
            if line.len() < 4 || line.as_bytes()[3] != b'-' {
                break;
            }
        }
        let reply = reply.trim_end().to_string();
        if reply.is_empty() {
            return Err(SmtpError::Transport(Error::std_io("empty reply from server")));
        }
        Ok(reply)
    }
}
