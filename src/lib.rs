pub mod utils;

pub mod smtp;
