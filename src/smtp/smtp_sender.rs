use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::info;

use crate::{utils, smtp::{smtp_command::SmtpCommand, smtp_credentials::SmtpCredentials, smtp_error::{SmtpError, SmtpResult}, smtp_message::SmtpMessage, smtp_session::SmtpSession}};

const DEFAULT_PORT: u16 = 25;

pub struct SmtpSender {
    host: String,
    from: String,
    to: Vec<String>,
    cc: Vec<String>,
    bcc: Vec<String>,
    credentials: SmtpCredentials,
    timeout: Option<Duration>,
}

impl SmtpSender {
    /// Builds a new SmtpSender with the relay host, with an optional port
    /// suffix ("host:port"). The port defaults to 25.
    pub fn new<T: AsRef<str>>(host: T) -> Self {
        SmtpSender {
            host: host.as_ref().to_string(),
            from: String::new(),
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            credentials: SmtpCredentials::default(),
            timeout: None,
        }
    }

    /// Sets the sender address. Calling it again replaces the previous value.
    pub fn from<T: AsRef<str>>(mut self, email_address: T) -> Self {
        self.from = email_address.as_ref().to_string();
        self
    }

    /// Adds a recipient. Each call appends, preserving call order.
    pub fn to<T: AsRef<str>>(mut self, email_address: T) -> Self {
        self.to.push(email_address.as_ref().to_string());
        self
    }

    /// Adds every recipient in the iterator, preserving order.
    pub fn to_all<I, T>(mut self, email_addresses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.to.extend(email_addresses.into_iter().map(|address| address.as_ref().to_string()));
        self
    }

    /// Adds a carbon copy recipient. Each call appends, preserving call order.
    pub fn cc<T: AsRef<str>>(mut self, email_address: T) -> Self {
        self.cc.push(email_address.as_ref().to_string());
        self
    }

    /// Adds every carbon copy recipient in the iterator, preserving order.
    pub fn cc_all<I, T>(mut self, email_addresses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.cc.extend(email_addresses.into_iter().map(|address| address.as_ref().to_string()));
        self
    }

    /// Adds a blind carbon copy recipient. Each call appends, preserving call order.
    pub fn bcc<T: AsRef<str>>(mut self, email_address: T) -> Self {
        self.bcc.push(email_address.as_ref().to_string());
        self
    }

    /// Adds every blind carbon copy recipient in the iterator, preserving order.
    pub fn bcc_all<I, T>(mut self, email_addresses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.bcc.extend(email_addresses.into_iter().map(|address| address.as_ref().to_string()));
        self
    }

    /// Sets the credentials used for `AUTH LOGIN`.
    ///
    /// An empty user or password is ignored and does not clear a previously
    /// set value.
    pub fn credentials<T: AsRef<str>>(mut self, user: T, password: T) -> Self {
        if !user.as_ref().is_empty() {
            self.credentials.user = user.as_ref().to_string();
        }
        if !password.as_ref().is_empty() {
            self.credentials.password = password.as_ref().to_string();
        }
        self
    }

    /// Sets a deadline applied to every read and write on the connection.
    /// Without one, each exchange blocks until the peer responds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Relays the message through the configured server.
    ///
    /// Opens one connection, drives the full command sequence and releases
    /// the connection whether the exchange succeeded or not. The sender is
    /// consumed; one send attempt per instance.
    pub fn send(self, message: SmtpMessage) -> SmtpResult<()> {
        self.validate()?;
        let (host, port) = utils::parse_host(&self.host, DEFAULT_PORT)
            .map_err(|err| SmtpError::Configuration(format!("invalid port in host \"{}\": {}", self.host, err)))?;
        let commands = self.commands(&message);
        let recipients = self.to.len() + self.cc.len() + self.bcc.len();

        info!("sending mail from {} to {} recipient(s) via {}:{}", self.from, recipients, host, port);
        let mut session = SmtpSession::connect(host, port, self.timeout)?;
        let result = session.run(&commands);
        session.close();
        result
    }

    /// The full ordered command sequence for this message.
    ///
    /// Deterministic for identical sender and message state.
    pub fn commands(&self, message: &SmtpMessage) -> Vec<SmtpCommand> {
        let mut commands = vec![
            SmtpCommand::line("HELO sendmail", 250),
            SmtpCommand::line("AUTH LOGIN", 334),
            SmtpCommand::line(STANDARD.encode(&self.credentials.user), 334),
            SmtpCommand::line(STANDARD.encode(&self.credentials.password), 235),
            SmtpCommand::line(format!("MAIL FROM:<{}>", self.from), 250),
        ];
        for recipient in self.to.iter().chain(self.cc.iter()).chain(self.bcc.iter()) {
            commands.push(SmtpCommand::line(format!("RCPT TO:<{}>", recipient), 250));
        }
        commands.push(SmtpCommand::line("DATA", 354));
        commands.push(SmtpCommand::data(self.render_message(message), 250));
        commands.push(SmtpCommand::line("QUIT", 221));
        commands
    }

    fn validate(&self) -> SmtpResult<()> {
        if self.from.is_empty() {
            return Err(SmtpError::Configuration("a sender address is required".to_string()));
        }
        if self.to.is_empty() && self.cc.is_empty() && self.bcc.is_empty() {
            return Err(SmtpError::Configuration("at least one recipient is required".to_string()));
        }
        Ok(())
    }

    fn render_message(&self, message: &SmtpMessage) -> Vec<u8> {
        let mut mail = String::new();
        for (name, value) in message.headers() {
            mail.push_str(&format!("{}: {}\r\n", name, value));
        }
        mail.push_str(&format!("FROM:<{}>\r\n", self.from));
        if !self.to.is_empty() {
            mail.push_str(&format!("TO:{}\r\n", join_addresses(&self.to)));
        }
        if !self.cc.is_empty() {
            mail.push_str(&format!("Cc:{}\r\n", join_addresses(&self.cc)));
        }
        if !self.bcc.is_empty() {
            mail.push_str(&format!("Bcc:{}\r\n", join_addresses(&self.bcc)));
        }
        mail.push_str(&format!("Subject:{}\r\n", message.subject));
        mail.push_str("\r\n");
        mail.push_str(&message.body);
        mail.push_str("\r\n.\r\n");
        mail.into_bytes()
    }
}

fn join_addresses(addresses: &[String]) -> String {
    addresses.iter().map(|address| format!("<{}>", address)).collect::<Vec<String>>().join(",")
}
