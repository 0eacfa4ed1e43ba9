//! Movement-balance constants and the traversal envelope derived from them.
//!
//! The envelope is computed once at startup with projectile-motion identities and
//! then handed to the reachability validator as [`ReachLimits`].

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Drop height treated as always survivable. Larger than any room is tall.
pub const FREE_FALL_LIMIT: f32 = 2000.0;

/// Game-balance constants, in pixels and ticks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConstants {
    pub walk_speed: f32,
    pub jump_impulse: f32,
    pub gravity: f32,
    pub dash_speed: f32,
    pub dash_duration: f32,
}

impl Default for MovementConstants {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            jump_impulse: 12.0,
            gravity: 0.5,
            dash_speed: 15.0,
            dash_duration: 4.0,
        }
    }
}

impl MovementConstants {
    /// Rejects zero, negative and non-finite constants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("walk_speed", self.walk_speed),
            ("jump_impulse", self.jump_impulse),
            ("gravity", self.gravity),
            ("dash_speed", self.dash_speed),
            ("dash_duration", self.dash_duration),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositiveConstant { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementEnvelope {
    pub max_jump_height: f32,
    pub max_horizontal_jump: f32,
    pub max_dash_distance: f32,
}

impl MovementEnvelope {
    /// Derives the envelope without checking the inputs; see [`MovementEnvelope::try_new`].
    pub fn from_constants(constants: &MovementConstants) -> Self {
        let MovementConstants { walk_speed, jump_impulse, gravity, dash_speed, dash_duration } =
            *constants;
        Self {
            max_jump_height: jump_impulse * jump_impulse / (2.0 * gravity),
            max_horizontal_jump: jump_impulse * walk_speed / gravity,
            max_dash_distance: dash_speed * dash_duration,
        }
    }

    pub fn try_new(constants: &MovementConstants) -> Result<Self, ConfigError> {
        constants.validate()?;
        Ok(Self::from_constants(constants))
    }

    pub fn max_reachable_height(&self) -> f32 {
        self.max_jump_height + self.max_dash_distance
    }

    pub fn max_horizontal_reach(&self) -> f32 {
        self.max_horizontal_jump + self.max_dash_distance
    }

    pub fn reach_limits(&self) -> ReachLimits {
        ReachLimits {
            max_gap: self.max_horizontal_reach(),
            max_rise: self.max_reachable_height(),
            max_fall: FREE_FALL_LIMIT,
        }
    }
}

/// The three bounds the reachability graph is built from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReachLimits {
    pub max_gap: f32,
    pub max_rise: f32,
    pub max_fall: f32,
}

impl ReachLimits {
    pub fn new(max_gap: f32, max_rise: f32) -> Self {
        Self { max_gap, max_rise, max_fall: FREE_FALL_LIMIT }
    }
}

impl Default for ReachLimits {
    fn default() -> Self {
        MovementEnvelope::from_constants(&MovementConstants::default()).reach_limits()
    }
}
