use std::time::Duration;

use log::{debug, error, warn};
use serde::de::DeserializeOwned;

use crate::session::{Credentials, Session};
use crate::transport::{HttpTransport, Request, Response, Transport};
use crate::types::{Envelope, MeasurementsData, Sensor, SensorsData};
use crate::Result;

pub struct Client<T> {
    session: Session<T>,
}

impl Client<HttpTransport> {
    pub fn new(base_url: &str, credentials: Credentials, timeout: Duration) -> Result<Self> {
        let transport = HttpTransport::new(base_url)?;
        Ok(Self::with_transport(transport, credentials, timeout))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T, credentials: Credentials, timeout: Duration) -> Self {
        Self {
            session: Session::new(transport, credentials, timeout),
        }
    }

    pub async fn authenticate(&self) -> Result<()> {
        self.session.authenticate().await
    }

    pub async fn list_sensors(&self) -> Vec<Sensor> {
        let response = self
            .session
            .call_with_refresh(Request::get(["sensors"]))
            .await;

        match parse::<SensorsData>(response, "sensors") {
            Some(data) => {
                let sensors = data.into_sensors();
                debug!("listed {} sensors", sensors.len());
                sensors
            }
            None => vec![],
        }
    }

    pub async fn latest_value(&self, sensor_id: &str) -> Option<f64> {
        let response = self
            .session
            .call_with_refresh(Request::get(["sensors", sensor_id, "measurements"]))
            .await;

        let data = parse::<MeasurementsData>(response, "measurements")?;

        match data.latest() {
            Some(Ok(value)) => Some(value),
            Some(Err(err)) => {
                error!("unable to parse latest measurement of {sensor_id}: {err}");
                None
            }
            None => {
                warn!("sensor {sensor_id} has no measurements");
                None
            }
        }
    }
}

fn parse<D: DeserializeOwned>(response: Option<Response>, what: &str) -> Option<D> {
    let response = response?;

    if !response.is_success() {
        error!("unable to get {what}: status {}", response.status_code);
        return None;
    }

    match serde_json::from_slice::<Envelope<D>>(&response.body) {
        Ok(envelope) => Some(envelope.data),
        Err(err) => {
            error!("unable to parse {what}: {err}");
            None
        }
    }
}
