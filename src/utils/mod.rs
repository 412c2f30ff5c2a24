pub mod error;

pub fn parse_host(host: &str, default_port: u16) -> Result<(&str, u16), std::num::ParseIntError> {
    if let Some((host, port)) = host.split_once(":") {
        let port: u16 = port.parse()?;
        Ok((host, port))
    } else {
        Ok((host, default_port))
    }
}
