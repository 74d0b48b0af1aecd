use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use display::RegisterWriter;
use mockall::mock;
use serde_json::{json, Value};
use telemetry::{Request, Response, Sensor, SensorKind, Transport};
use tokio_util::sync::CancellationToken;

mock! {
    pub Api {}

    #[async_trait]
    impl Transport for Api {
        async fn send(&self, request: Request) -> telemetry::Result<Response>;
    }
}

/// Canned answers of the telemetry API.
#[derive(Clone, Default)]
pub struct Telemetry {
    pub login_status: Option<u16>,
    pub listing: Vec<(&'static str, &'static str, &'static str)>,
    pub measurements: HashMap<String, Vec<f64>>,
}

impl Telemetry {
    pub fn with_sensor(
        mut self,
        id: &'static str,
        room: &'static str,
        type_id: &'static str,
    ) -> Self {
        self.listing.push((id, room, type_id));
        self
    }

    pub fn with_values(mut self, id: &'static str, values: &[f64]) -> Self {
        self.measurements.insert(id.to_string(), values.to_vec());
        self
    }

    pub fn with_failing_login(mut self) -> Self {
        self.login_status = Some(500);
        self
    }

    pub fn sensors(&self) -> Vec<Sensor> {
        self.listing
            .iter()
            .map(|(id, room, type_id)| Sensor {
                id: id.to_string(),
                room: room.to_string(),
                kind: SensorKind::from_type_id(type_id),
            })
            .collect()
    }

    pub fn into_mock(self) -> MockApi {
        let mut api = MockApi::new();
        api.expect_send().returning(move |request| Ok(self.respond(&request)));
        api
    }

    fn respond(&self, request: &Request) -> Response {
        let path: Vec<&str> = request.path.iter().map(String::as_str).collect();

        let (status_code, body) = match path.as_slice() {
            ["auth", "login", "employee"] => match self.login_status {
                Some(status_code) => (status_code, json!({ "message": "login failed" })),
                None => (200, json!({ "data": { "token": "token" } })),
            },
            ["sensors"] => {
                let sensors: Vec<Value> = self
                    .listing
                    .iter()
                    .map(|(id, room, type_id)| {
                        json!({ "id": id, "space": { "name": room }, "type": { "id": type_id } })
                    })
                    .collect();

                (200, json!({ "data": { "sensors": sensors } }))
            }
            ["sensors", id, "measurements"] => match self.measurements.get(*id) {
                Some(values) => {
                    let measurements: Vec<Value> =
                        values.iter().map(|value| json!({ "value": value })).collect();

                    (200, json!({ "data": { "measurements": measurements } }))
                }
                None => (404, json!({ "message": "not found" })),
            },
            _ => (404, json!({ "message": "not found" })),
        };

        Response {
            status_code,
            body: serde_json::to_vec(&body).unwrap(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Recording {
    pub lines: Vec<(u16, String)>,
    pub closed: bool,
}

pub type Writes = Arc<Mutex<Recording>>;

/// Display writer that decodes every write back into text. When `stop_after`
/// is set the token is cancelled once that many lines were written.
pub struct RecordingWriter {
    writes: Writes,
    stop_after: Option<(usize, CancellationToken)>,
}

impl RecordingWriter {
    pub fn new(writes: &Writes, stop_after: Option<(usize, CancellationToken)>) -> Self {
        Self {
            writes: writes.clone(),
            stop_after,
        }
    }
}

#[async_trait]
impl RegisterWriter for RecordingWriter {
    async fn write_registers(&mut self, address: u16, values: &[u16]) -> display::Result<()> {
        let bytes: Vec<u8> = values.iter().flat_map(|value| value.to_be_bytes()).collect();
        let text = String::from_utf8_lossy(&bytes)
            .trim_end_matches('\0')
            .to_string();

        let mut writes = self.writes.lock().unwrap();
        writes.lines.push((address, text));

        if let Some((count, shutdown)) = &self.stop_after {
            if writes.lines.len() >= *count {
                shutdown.cancel();
            }
        }

        Ok(())
    }

    async fn close(&mut self) -> display::Result<()> {
        self.writes.lock().unwrap().closed = true;
        Ok(())
    }
}
