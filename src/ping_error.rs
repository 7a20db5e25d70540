use std::{error::Error, fmt, io};

pub type GenericError = Box<dyn Error + Send + Sync + 'static>;

pub type PingResult<T> = std::result::Result<T, PingError>;

#[derive(Debug)]
pub enum PingError {
    /// The target host has no usable address. Fatal to the session.
    Resolution { host: String, message: String },
    /// Opening, writing to, arming or reading a socket failed. Scoped to one probe.
    Socket(io::Error),
    /// Packet construction input cannot be encoded. Fatal at configuration time.
    Encoding(String),
    /// An inbound datagram is not an ICMP echo message of the expected family.
    Parse(String),
}

impl PingError {
    pub(crate) fn resolution(host: &str, message: impl Into<String>) -> Self {
        PingError::Resolution { host: host.to_owned(), message: message.into() }
    }
}

impl fmt::Display for PingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            PingError::Resolution { host, message } => {
                write!(f, "ResolutionError: {host:?}")?;
                if !message.is_empty() {
                    write!(f, ": {message}")?;
                }
                Ok(())
            }
            PingError::Socket(error) => write!(f, "SocketError: {error}"),
            PingError::Encoding(message) => write!(f, "EncodingError: {message}"),
            PingError::Parse(message) => write!(f, "ParseError: {message}"),
        }
    }
}

impl Error for PingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PingError::Socket(error) => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for PingError {
    fn from(error: io::Error) -> PingError {
        PingError::Socket(error)
    }
}
