//! Gesture timing configuration.
//!
//! A [`GestureConfig`] is built once, typically at startup, and shared by every
//! tracker and button through an [`Arc`]. It is never mutated afterwards.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

/// Default max time between two taps for them to count as a double tap.
pub const DEFAULT_DOUBLE_TAP_TIMEOUT: Duration = Duration::from_millis(200);

/// Default time a press must be held to count as a long press.
pub const DEFAULT_LONG_PRESS_DELAY: Duration = Duration::from_secs(1);

/// Default time a press must be held before it starts repeating.
pub const DEFAULT_REPEAT_DELAY: Duration = Duration::from_secs(1);

/// Default presentation transition while the drag state follows the pointer.
pub const DEFAULT_STATE_CHANGE_TRANSITION: Duration = Duration::from_millis(250);

/// Default presentation transition when the drag state returns to rest.
pub const DEFAULT_STATE_END_TRANSITION: Duration = Duration::from_secs(2);

/// Timings shared by all gesture trackers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureConfig {
    /// Max time between two taps for them to count as a double tap.
    pub double_tap_timeout: Duration,
    /// Time a press must be held to count as a long press.
    pub long_press_delay: Duration,
    /// Time a press must be held before it starts repeating.
    pub repeat_delay: Duration,
    /// Transition hint attached to state changes during movement.
    pub state_change_transition: Duration,
    /// Transition hint attached to the end-of-gesture return to rest.
    pub state_end_transition: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_tap_timeout: DEFAULT_DOUBLE_TAP_TIMEOUT,
            long_press_delay: DEFAULT_LONG_PRESS_DELAY,
            repeat_delay: DEFAULT_REPEAT_DELAY,
            state_change_transition: DEFAULT_STATE_CHANGE_TRANSITION,
            state_end_transition: DEFAULT_STATE_END_TRANSITION,
        }
    }
}

impl GestureConfig {
    /// Start building a config from the defaults.
    pub fn builder() -> GestureConfigBuilder {
        GestureConfigBuilder::default()
    }

    /// Wrap the default config for sharing.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Check that every timing is a positive duration.
    ///
    /// Transition hints may be zero; a zero transition simply means "no animation".
    pub fn validate(&self) -> ConfigResult<()> {
        let timings = [
            ("double_tap_timeout", self.double_tap_timeout),
            ("long_press_delay", self.long_press_delay),
            ("repeat_delay", self.repeat_delay),
        ];

        for (name, value) in timings {
            if value.is_zero() {
                return Err(ConfigError::InvalidTiming { name });
            }
        }
        Ok(())
    }
}

/// Chained builder for [`GestureConfig`].
#[derive(Debug, Clone, Default)]
pub struct GestureConfigBuilder {
    config: GestureConfig,
}

impl GestureConfigBuilder {
    pub fn double_tap_timeout(mut self, timeout: Duration) -> Self {
        self.config.double_tap_timeout = timeout;
        self
    }

    pub fn long_press_delay(mut self, delay: Duration) -> Self {
        self.config.long_press_delay = delay;
        self
    }

    pub fn repeat_delay(mut self, delay: Duration) -> Self {
        self.config.repeat_delay = delay;
        self
    }

    pub fn state_change_transition(mut self, duration: Duration) -> Self {
        self.config.state_change_transition = duration;
        self
    }

    pub fn state_end_transition(mut self, duration: Duration) -> Self {
        self.config.state_end_transition = duration;
        self
    }

    /// Validate and freeze the config.
    pub fn build(self) -> ConfigResult<Arc<GestureConfig>> {
        self.config.validate()?;
        Ok(Arc::new(self.config))
    }
}
