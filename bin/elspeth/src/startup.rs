use std::future::Future;

use display::{Display, RegisterWriter};
use log::info;
use telemetry::{Client, Transport};

use crate::rooms::RoomMap;
use crate::{Error, Result};

/// Logs in, opens the display through `connect` and groups the sensors by
/// room. Login happens before the display is touched; when no room has a
/// recognized sensor the display is closed again.
pub async fn start<T, W, F, Fut>(client: &Client<T>, connect: F) -> Result<(Display<W>, RoomMap)>
where
    T: Transport,
    W: RegisterWriter,
    F: FnOnce() -> Fut,
    Fut: Future<Output = display::Result<Display<W>>>,
{
    client.authenticate().await?;

    let mut display = connect().await?;

    let rooms = RoomMap::build(&client.list_sensors().await);
    if rooms.is_empty() {
        display.close().await;
        return Err(Error::NoRooms);
    }

    info!(
        "found {} rooms, {} with both sensors",
        rooms.len(),
        rooms.complete_rooms().count()
    );

    Ok((display, rooms))
}
