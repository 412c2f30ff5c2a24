use std::fmt;

/// A single SMTP wire command paired with the reply code the server is
/// expected to answer with.
///
/// Regular commands are CRLF-terminated lines. The message payload sent
/// after `DATA` is carried as one command as well, already terminated by the
/// `CRLF . CRLF` end-of-data marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpCommand {
    payload: Vec<u8>,
    expect: u16,
    is_data: bool,
}

impl SmtpCommand {
    /// A CRLF-terminated command line.
    pub fn line<T: AsRef<str>>(line: T, expect: u16) -> Self {
        SmtpCommand {
            payload: format!("{}\r\n", line.as_ref()).into_bytes(),
            expect,
            is_data: false,
        }
    }

    /// The full message payload, terminated by the end-of-data marker.
    pub fn data(payload: Vec<u8>, expect: u16) -> Self {
        SmtpCommand {
            payload,
            expect,
            is_data: true,
        }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn expect(&self) -> u16 {
        self.expect
    }
}

impl fmt::Display for SmtpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_data {
            write!(f, "[message data, {} bytes]", self.payload.len())
        } else {
            write!(f, "{}", String::from_utf8_lossy(&self.payload).trim_end())
        }
    }
}
