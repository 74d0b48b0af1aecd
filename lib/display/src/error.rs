use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Modbus(tokio_modbus::Error),
    Exception(tokio_modbus::ExceptionCode),
    UnresolvedAddress(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<tokio_modbus::Error> for Error {
    fn from(err: tokio_modbus::Error) -> Self {
        Self::Modbus(err)
    }
}

impl From<tokio_modbus::ExceptionCode> for Error {
    fn from(code: tokio_modbus::ExceptionCode) -> Self {
        Self::Exception(code)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Modbus(err) => write!(f, "modbus error: {err}"),
            Self::Exception(code) => write!(f, "device responded with exception {code:?}"),
            Self::UnresolvedAddress(address) => write!(f, "unable to resolve {address}"),
        }
    }
}

impl std::error::Error for Error {}
