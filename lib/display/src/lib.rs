mod driver;
mod encoder;
mod error;
mod modbus;

pub use driver::{Display, Layout, Line, RegisterWriter};
pub use encoder::{encode_line, fit_to_width, pack_bytes};
pub use error::Error;
pub use modbus::connect;

pub use tokio_modbus::client::Context;

pub type Result<T> = std::result::Result<T, Error>;
