use std::fmt;

use log::warn;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginData {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SensorsData {
    pub sensors: Vec<Value>,
}

impl SensorsData {
    /// Entries that do not describe a sensor are logged and skipped.
    pub fn into_sensors(self) -> Vec<Sensor> {
        self.sensors
            .into_iter()
            .filter_map(|entry| match Sensor::deserialize(&entry) {
                Ok(sensor) => Some(sensor),
                Err(err) => {
                    warn!("skipping sensor {entry}: {err}");
                    None
                }
            })
            .collect()
    }
}

/// Only the first, most recent entry is ever parsed.
#[derive(Debug, Deserialize)]
pub(crate) struct MeasurementsData {
    pub measurements: Vec<Value>,
}

impl MeasurementsData {
    pub fn latest(&self) -> Option<Result<f64, serde_json::Error>> {
        let entry = self.measurements.first()?;
        Some(Measurement::deserialize(entry).map(|measurement| measurement.value))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Measurement {
    #[serde(deserialize_with = "number_or_string")]
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SensorKind {
    Temperature,
    Humidity,
    Other(String),
}

impl SensorKind {
    pub fn from_type_id(id: &str) -> Self {
        match id {
            "CT" => Self::Temperature,
            "RH" => Self::Humidity,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "temperature"),
            Self::Humidity => write!(f, "humidity"),
            Self::Other(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sensor {
    pub id: String,
    pub room: String,
    pub kind: SensorKind,
}

impl<'de> Deserialize<'de> for Sensor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Space {
            name: String,
        }

        #[derive(Deserialize)]
        struct Type {
            id: String,
        }

        #[derive(Deserialize)]
        struct Raw {
            #[serde(deserialize_with = "opaque_id")]
            id: String,
            space: Space,
            #[serde(rename = "type")]
            kind: Type,
        }

        let raw = Raw::deserialize(deserializer)?;

        Ok(Sensor {
            id: raw.id,
            room: raw.space.name,
            kind: SensorKind::from_type_id(&raw.kind.id),
        })
    }
}

fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl Visitor<'_> for IdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a string or integer id")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct ValueVisitor;

    impl Visitor<'_> for ValueVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a number or a numeric string")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            v.trim().parse().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(ValueVisitor)
}
