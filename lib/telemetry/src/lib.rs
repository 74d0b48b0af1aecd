mod client;
mod error;
mod session;
mod transport;
mod types;

pub use client::Client;
pub use error::Error;
pub use session::{Credentials, Session};
pub use transport::{HttpTransport, Method, Request, Response, Transport, UNAUTHORIZED};
pub use types::{Sensor, SensorKind};

pub type Result<T> = std::result::Result<T, Error>;
