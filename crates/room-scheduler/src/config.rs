//! Scheduler configuration: business window, rooms, timezone, reminder lead.
//!
//! Loaded from JSON with every field optional, then overlaid from `ROOMS_*`
//! environment variables.

use std::collections::HashSet;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::policy::BusinessHours;
use crate::reservation::{Room, RoomId};
use crate::time::TimeOfDay;

pub const ENV_OPEN: &str = "ROOMS_OPEN";
pub const ENV_CLOSE: &str = "ROOMS_CLOSE";
pub const ENV_TIMEZONE: &str = "ROOMS_TIMEZONE";
pub const ENV_REMINDER_LEAD: &str = "ROOMS_REMINDER_LEAD_MINUTES";

const DEFAULT_ROOM_COUNT: u32 = 4;
const DEFAULT_REMINDER_LEAD_MINUTES: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub hours: BusinessHours,
    /// IANA timezone the rooms live in, e.g. "Asia/Tokyo".
    pub timezone: String,
    pub reminder_lead_minutes: u32,
    pub rooms: Vec<Room>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            hours: BusinessHours::default(),
            timezone: "UTC".to_string(),
            reminder_lead_minutes: DEFAULT_REMINDER_LEAD_MINUTES,
            rooms: (1..=DEFAULT_ROOM_COUNT)
                .map(|n| Room {
                    id: RoomId(n),
                    name: format!("Room {n}"),
                })
                .collect(),
        }
    }
}

impl SchedulerConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SchedulerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay `ROOMS_*` variables from the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values produced by `lookup` for each `ROOMS_*` key, then validate.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(open) = lookup(ENV_OPEN) {
            self.hours.open = parse_time(ENV_OPEN, &open)?;
        }
        if let Some(close) = lookup(ENV_CLOSE) {
            self.hours.close = parse_time(ENV_CLOSE, &close)?;
        }
        if let Some(tz) = lookup(ENV_TIMEZONE) {
            self.timezone = tz;
        }
        if let Some(lead) = lookup(ENV_REMINDER_LEAD) {
            self.reminder_lead_minutes =
                lead.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber {
                        var: ENV_REMINDER_LEAD,
                        value: lead.clone(),
                    })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hours.open >= self.hours.close {
            return Err(ConfigError::EmptyBusinessWindow {
                open: self.hours.open.to_string(),
                close: self.hours.close.to_string(),
            });
        }
        self.tz()?;
        if self.rooms.is_empty() {
            return Err(ConfigError::NoRooms);
        }
        let mut seen = HashSet::new();
        for room in &self.rooms {
            if !seen.insert(room.id) {
                return Err(ConfigError::DuplicateRoom(room.id));
            }
        }
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone(self.timezone.clone()))
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }
}

fn parse_time(field: &'static str, value: &str) -> Result<TimeOfDay, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidTime {
        field,
        value: value.to_string(),
    })
}
