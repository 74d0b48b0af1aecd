use std::fmt;

#[derive(Debug)]
pub enum Error {
    MissingVariable(&'static str),
    InvalidVariable(&'static str, String),
    SameLineRegister(u16),
    Telemetry(telemetry::Error),
    Display(display::Error),
    NoRooms,
}

impl From<telemetry::Error> for Error {
    fn from(err: telemetry::Error) -> Self {
        Self::Telemetry(err)
    }
}

impl From<display::Error> for Error {
    fn from(err: display::Error) -> Self {
        Self::Display(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVariable(name) => write!(f, "set ENV variable {name}"),
            Self::InvalidVariable(name, value) => write!(f, "invalid {name}: {value:?}"),
            Self::SameLineRegister(address) => {
                write!(f, "both display lines start at register {address}")
            }
            Self::Telemetry(err) => write!(f, "telemetry error: {err}"),
            Self::Display(err) => write!(f, "display error: {err}"),
            Self::NoRooms => write!(f, "no sensors recovered"),
        }
    }
}

impl std::error::Error for Error {}
