use crate::smtp::smtp_content_type::SmtpContentType;

pub struct SmtpMessage {
    pub subject: String,
    pub body: String,
    pub content_type: SmtpContentType,
    headers: Vec<(String, String)>,
}

impl SmtpMessage {
    pub fn new() -> Self {
        SmtpMessage {
            subject: String::new(),
            body: String::new(),
            content_type: SmtpContentType::TextPlain,
            headers: Vec::new(),
        }
    }

    pub fn with_subject<T: AsRef<str>>(mut self, subject: T) -> Self {
        self.subject = subject.as_ref().to_string();
        self
    }

    pub fn with_body<T: AsRef<str>>(mut self, body: T) -> Self {
        self.body = body.as_ref().to_string();
        self
    }

    pub fn with_content_type(mut self, content_type: SmtpContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Appends a custom header, rendered after the standard ones in the
    /// order the calls were made.
    pub fn with_header<T: AsRef<str>>(mut self, name: T, value: T) -> Self {
        self.headers.push((name.as_ref().to_string(), value.as_ref().to_string()));
        self
    }

    /// The full header block for this message: the derived standard headers
    /// followed by any custom ones, in insertion order.
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Mime-Version".to_string(), "1.0".to_string()),
            ("Content-Type".to_string(), self.content_type.header_value().to_string()),
            ("Content-Transfer-Encoding".to_string(), "7bit".to_string()),
        ];
        headers.extend(self.headers.iter().cloned());
        headers
    }
}
