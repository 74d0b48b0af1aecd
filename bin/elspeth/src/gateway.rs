use std::time::Duration;

use display::{Display, Line, RegisterWriter};
use log::{debug, info, warn};
use telemetry::{Client, Transport};
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::rooms::{CompleteRoom, RoomMap};

pub const SENSOR_ERROR: &str = "Sensor error";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub room_delay: Duration,
    pub error_delay: Duration,
    /// Full passes over the rooms between two sensor listings, 0 disables.
    pub rooms_refresh_passes: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Shown,
    SensorError,
}

impl Outcome {
    pub fn delay(&self, timing: &Timing) -> Duration {
        match self {
            Self::Shown => timing.room_delay,
            Self::SensorError => timing.error_delay,
        }
    }
}

pub fn format_reading(temperature: f64, humidity: f64) -> String {
    format!("{temperature:.1}C  {humidity:.1}%")
}

pub struct Gateway<T, W> {
    client: Client<T>,
    display: Display<W>,
    rooms: RoomMap,
    timing: Timing,
}

impl<T: Transport, W: RegisterWriter> Gateway<T, W> {
    pub fn new(client: Client<T>, display: Display<W>, rooms: RoomMap, timing: Timing) -> Self {
        Self {
            client,
            display,
            rooms,
            timing,
        }
    }

    /// Cycles through the rooms until `shutdown` is cancelled.
    pub async fn run(&mut self, shutdown: CancellationToken) {
        let mut passes: u32 = 0;

        while !shutdown.is_cancelled() {
            let rooms: Vec<CompleteRoom> = self.rooms.complete_rooms().collect();

            if rooms.is_empty() {
                warn!("no room has both a temperature and a humidity sensor");

                if !pause(&shutdown, self.timing.room_delay).await {
                    return;
                }
            }

            for room in rooms {
                let outcome = tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => return,
                    outcome = self.show_room(&room) => outcome,
                };

                if !pause(&shutdown, outcome.delay(&self.timing)).await {
                    return;
                }
            }

            passes = passes.wrapping_add(1);

            let refresh_every = self.timing.rooms_refresh_passes;
            if refresh_every > 0 && passes % refresh_every == 0 {
                tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => return,
                    _ = self.refresh_rooms() => (),
                };
            }
        }
    }

    pub async fn show_room(&mut self, room: &CompleteRoom) -> Outcome {
        let temperature = self.client.latest_value(&room.temperature).await;
        let humidity = self.client.latest_value(&room.humidity).await;

        match (temperature, humidity) {
            (Some(temperature), Some(humidity)) => {
                debug!("{}: {temperature} C, {humidity} %", room.name);

                self.display.write_line(Line::First, &room.name).await;
                self.display
                    .write_line(Line::Second, &format_reading(temperature, humidity))
                    .await;

                Outcome::Shown
            }
            _ => {
                warn!(
                    "{} is missing a reading (temperature {temperature:?}, humidity {humidity:?})",
                    room.name
                );

                self.display.write_line(Line::First, SENSOR_ERROR).await;
                self.display.write_line(Line::Second, " ").await;

                Outcome::SensorError
            }
        }
    }

    async fn refresh_rooms(&mut self) {
        let rooms = RoomMap::build(&self.client.list_sensors().await);

        if rooms.is_empty() {
            warn!("sensor listing came back empty, keeping {} rooms", self.rooms.len());
            return;
        }

        if rooms != self.rooms {
            info!("rooms changed, now {} rooms", rooms.len());
        }

        self.rooms = rooms;
    }

    pub async fn close(mut self) {
        self.display.close().await;
    }
}

/// Returns `false` when `shutdown` fired before `delay` elapsed.
async fn pause(shutdown: &CancellationToken, delay: Duration) -> bool {
    tokio::select! {
        biased;
        _ = shutdown.cancelled() => false,
        _ = time::sleep(delay) => true,
    }
}
