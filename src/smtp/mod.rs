mod smtp_credentials;
pub mod smtp_command;
pub mod smtp_content_type;
pub mod smtp_error;
pub mod smtp_message;
pub mod smtp_sender;
pub mod smtp_session;
