use std::str::FromStr;
use std::time::Duration;

use display::Layout;
use telemetry::Credentials;

use crate::gateway::Timing;
use crate::{Error, Result};

#[derive(Clone, Debug)]
pub struct Config {
    pub display_address: String,
    pub display_port: u16,
    pub unit_id: u8,
    pub layout: Layout,
    pub api_base_url: String,
    pub credentials: Credentials,
    pub api_timeout: Duration,
    pub timing: Timing,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let layout = Layout {
            first_line: vars.parsed("DISPLAY_LINE1_REGISTER", 1)?,
            second_line: vars.parsed("DISPLAY_LINE2_REGISTER", 13)?,
            width: vars.parsed("DISPLAY_WIDTH", 12)?,
        };

        if layout.width == 0 {
            return Err(Error::InvalidVariable("DISPLAY_WIDTH", "0".to_string()));
        }

        if layout.first_line == layout.second_line {
            return Err(Error::SameLineRegister(layout.first_line));
        }

        Ok(Self {
            display_address: vars.required("DISPLAY_ADDRESS")?,
            display_port: vars.parsed("DISPLAY_PORT", 502)?,
            unit_id: vars.parsed("DISPLAY_UNIT_ID", 1)?,
            layout,
            api_base_url: vars.required("API_BASE_URL")?,
            credentials: Credentials::new(
                vars.required("API_USERNAME")?,
                vars.required("API_PASSWORD")?,
            ),
            api_timeout: Duration::from_secs(vars.parsed("API_TIMEOUT_SECS", 10)?),
            timing: Timing {
                room_delay: Duration::from_secs(vars.parsed("ROOM_DELAY_SECS", 10)?),
                error_delay: Duration::from_secs(vars.parsed("ERROR_DELAY_SECS", 5)?),
                rooms_refresh_passes: vars.parsed("ROOMS_REFRESH_PASSES", 0)?,
            },
        })
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn required(&self, name: &'static str) -> Result<String> {
        (self.0)(name).ok_or(Error::MissingVariable(name))
    }

    fn parsed<T: FromStr>(&self, name: &'static str, default: T) -> Result<T> {
        match (self.0)(name) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| Error::InvalidVariable(name, value)),
            None => Ok(default),
        }
    }
}
