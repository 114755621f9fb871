//! Game tuning configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Round timing and live-update buffering.
#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// Seconds a revealed result stays up before the table resets itself
    #[serde(default = "default_auto_reset_delay")]
    pub auto_reset_delay_secs: u64,

    /// Updates buffered per session room before slow clients skip ahead
    #[serde(default = "default_room_channel_capacity")]
    pub room_channel_capacity: usize,
}

impl GameConfig {
    pub fn auto_reset_delay(&self) -> Duration {
        Duration::from_secs(self.auto_reset_delay_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=60).contains(&self.auto_reset_delay_secs) {
            return Err(ValidationError::InvalidAutoResetDelay);
        }
        if !(1..=65536).contains(&self.room_channel_capacity) {
            return Err(ValidationError::InvalidRoomCapacity);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            auto_reset_delay_secs: default_auto_reset_delay(),
            room_channel_capacity: default_room_channel_capacity(),
        }
    }
}

fn default_auto_reset_delay() -> u64 {
    3
}

fn default_room_channel_capacity() -> usize {
    128
}
