#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpContentType {
    /// Plain text body
    TextPlain,
    /// `HTML` body
    TextHtml,
}

impl SmtpContentType {
    /// The `Content-Type` header value sent with the message.
    pub fn header_value(&self) -> &'static str {
        match self {
            SmtpContentType::TextPlain => "text/plain; charset=\"utf-8\"",
            SmtpContentType::TextHtml => "text/html; charset=\"utf-8\"",
        }
    }
}
