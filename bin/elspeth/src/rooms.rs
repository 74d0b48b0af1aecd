use log::{trace, warn};
use telemetry::{Sensor, SensorKind};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomSensors {
    pub temperature: Option<String>,
    pub humidity: Option<String>,
}

/// A room that has both a temperature and a humidity sensor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompleteRoom {
    pub name: String,
    pub temperature: String,
    pub humidity: String,
}

/// Rooms in the order they first appear in the sensor listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomMap {
    rooms: Vec<(String, RoomSensors)>,
}

impl RoomMap {
    pub fn build(sensors: &[Sensor]) -> Self {
        let mut map = Self::default();

        for sensor in sensors {
            if let SensorKind::Other(ref type_id) = sensor.kind {
                trace!("ignoring sensor {} of type {type_id}", sensor.id);
                continue;
            }

            let room = map.entry(&sensor.room);
            let slot = match sensor.kind {
                SensorKind::Temperature => &mut room.temperature,
                _ => &mut room.humidity,
            };

            if let Some(previous) = slot.replace(sensor.id.clone()) {
                warn!(
                    "{} has more than one {} sensor, using {} instead of {previous}",
                    sensor.room, sensor.kind, sensor.id
                );
            }
        }

        map
    }

    fn entry(&mut self, name: &str) -> &mut RoomSensors {
        let index = match self.rooms.iter().position(|(room, _)| room == name) {
            Some(index) => index,
            None => {
                self.rooms.push((name.to_string(), RoomSensors::default()));
                self.rooms.len() - 1
            }
        };

        &mut self.rooms[index].1
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&RoomSensors> {
        self.rooms
            .iter()
            .find_map(|(room, sensors)| (room == name).then_some(sensors))
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn complete_rooms(&self) -> impl Iterator<Item = CompleteRoom> + '_ {
        self.rooms.iter().filter_map(|(name, sensors)| {
            Some(CompleteRoom {
                name: name.clone(),
                temperature: sensors.temperature.clone()?,
                humidity: sensors.humidity.clone()?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor(id: &str, room: &str, type_id: &str) -> Sensor {
        Sensor {
            id: id.to_string(),
            room: room.to_string(),
            kind: SensorKind::from_type_id(type_id),
        }
    }

    #[test]
    fn test_groups_by_room_and_kind() {
        let map = RoomMap::build(&[
            sensor("t1", "Lab", "CT"),
            sensor("h2", "Office", "RH"),
            sensor("h1", "Lab", "RH"),
        ]);

        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get("Lab"),
            Some(&RoomSensors {
                temperature: Some("t1".to_string()),
                humidity: Some("h1".to_string()),
            })
        );
        assert_eq!(
            map.get("Office"),
            Some(&RoomSensors {
                temperature: None,
                humidity: Some("h2".to_string()),
            })
        );
    }

    #[test]
    fn test_last_sensor_wins() {
        let map = RoomMap::build(&[
            sensor("t1", "Lab", "CT"),
            sensor("t2", "Lab", "CT"),
            sensor("h1", "Lab", "RH"),
        ]);

        assert_eq!(map.get("Lab").unwrap().temperature, Some("t2".to_string()));
    }

    #[test]
    fn test_ignores_unrecognized_kinds() {
        let map = RoomMap::build(&[
            sensor("c1", "Lab", "CO2"),
            sensor("t1", "Lab", "CT"),
            sensor("c2", "Hall", "CO2"),
        ]);

        assert_eq!(
            map.get("Lab"),
            Some(&RoomSensors {
                temperature: Some("t1".to_string()),
                humidity: None,
            })
        );
        assert_eq!(map.get("Hall"), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_empty_listing() {
        assert!(RoomMap::build(&[]).is_empty());
    }

    #[test]
    fn test_complete_rooms_in_listing_order() {
        let map = RoomMap::build(&[
            sensor("h2", "Office", "RH"),
            sensor("t1", "Lab", "CT"),
            sensor("t3", "Hall", "CT"),
            sensor("t2", "Office", "CT"),
            sensor("h1", "Lab", "RH"),
        ]);

        let rooms: Vec<CompleteRoom> = map.complete_rooms().collect();

        assert_eq!(
            rooms,
            vec![
                CompleteRoom {
                    name: "Office".to_string(),
                    temperature: "t2".to_string(),
                    humidity: "h2".to_string(),
                },
                CompleteRoom {
                    name: "Lab".to_string(),
                    temperature: "t1".to_string(),
                    humidity: "h1".to_string(),
                },
            ]
        );
    }
}
