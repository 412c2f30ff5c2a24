pub struct Error;

impl Error {
    pub fn std_io<T: AsRef<str>>(message: T) -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::Other, message.as_ref())
    }
}
