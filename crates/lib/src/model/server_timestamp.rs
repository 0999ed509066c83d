//! Pending server-assigned timestamps and how readers see them.
//!
//! A write that asks the backend to stamp the commit time cannot know that
//! time locally. Until the write is acknowledged the field holds a
//! [`ServerTimestamp`], which remembers when the write was made locally and,
//! if the field was previously committed as a timestamp, that earlier value.
//! [`FieldValueOptions`] decides what a reader is shown in the meantime.

use serde::{Deserialize, Serialize};

use super::{FieldValue, Timestamp};

/// An uncommitted server timestamp awaiting acknowledgment.
///
/// Only `local_write_time` participates in ordering. `previous_value` is
/// metadata carried for [`ServerTimestampBehavior::Previous`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerTimestamp {
    local_write_time: Timestamp,
    previous_value: Option<Timestamp>,
}

impl ServerTimestamp {
    pub fn new(local_write_time: Timestamp, previous_value: Option<Timestamp>) -> Self {
        Self {
            local_write_time,
            previous_value,
        }
    }

    /// Local time at which the write was issued
    pub fn local_write_time(&self) -> Timestamp {
        self.local_write_time
    }

    /// Committed value the pending write supersedes, if one was supplied
    pub fn previous_value(&self) -> Option<Timestamp> {
        self.previous_value
    }

    /// Returns true if a previous value was supplied at construction
    pub fn has_previous_value(&self) -> bool {
        self.previous_value.is_some()
    }

    /// Produces the value a reader sees under `behavior`.
    pub fn resolve(&self, behavior: ServerTimestampBehavior) -> FieldValue {
        match behavior {
            ServerTimestampBehavior::None => FieldValue::Null,
            ServerTimestampBehavior::Estimate => FieldValue::Timestamp(self.local_write_time),
            ServerTimestampBehavior::Previous => self
                .previous_value
                .map_or(FieldValue::Null, FieldValue::Timestamp),
        }
    }
}

/// How a pending server timestamp is presented before it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerTimestampBehavior {
    /// Show null
    #[default]
    None,
    /// Show the local write time as a committed timestamp
    Estimate,
    /// Show the superseded value, or null when there is none
    Previous,
}

/// Reader-side options applied by [`FieldValue::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldValueOptions {
    pub server_timestamp_behavior: ServerTimestampBehavior,
}

impl FieldValueOptions {
    pub fn new(server_timestamp_behavior: ServerTimestampBehavior) -> Self {
        Self {
            server_timestamp_behavior,
        }
    }
}
