use async_trait::async_trait;
use log::{debug, info};
use tokio::net::lookup_host;
use tokio_modbus::client::{tcp, Client, Context, Writer};
use tokio_modbus::Slave;

use crate::driver::RegisterWriter;
use crate::{Error, Result};

/// Opens a Modbus TCP connection whose requests are addressed to `unit_id`.
pub async fn connect(host: &str, port: u16, unit_id: u8) -> Result<Context> {
    let address = lookup_host((host, port))
        .await?
        .next()
        .ok_or_else(|| Error::UnresolvedAddress(format!("{host}:{port}")))?;

    debug!("connecting to display at {address}");

    let context = tcp::connect_slave(address, Slave(unit_id)).await?;

    info!("connected to display at {address}, unit {unit_id}");

    Ok(context)
}

#[async_trait]
impl RegisterWriter for Context {
    async fn write_registers(&mut self, address: u16, values: &[u16]) -> Result<()> {
        self.write_multiple_registers(address, values).await??;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        Client::disconnect(self).await?;
        Ok(())
    }
}
