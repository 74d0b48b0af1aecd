mod config;
mod error;
mod gateway;
mod rooms;
mod startup;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::Error;
pub use gateway::{format_reading, Gateway, Outcome, Timing, SENSOR_ERROR};
pub use rooms::{CompleteRoom, RoomMap, RoomSensors};
pub use startup::start;

pub type Result<T> = std::result::Result<T, Error>;
