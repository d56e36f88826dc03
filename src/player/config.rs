use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use ron::Options;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building or loading a movement parameter block.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid movement config: `{field}` {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Tunable movement constants, as authored in a RON file.
///
/// Missing fields fall back to [`MovementStats::default`]. These values are
/// never read by the simulation directly; wrap them in [`MovementParams`] to
/// validate them and derive gravity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementStats {
    /// Top horizontal speed while walking
    pub max_walk_speed: f32,
    /// Top horizontal speed while the run modifier is held
    pub max_run_speed: f32,
    /// Lerp rate toward the target speed on the ground (1/s)
    pub ground_acceleration: f32,
    /// Lerp rate toward zero on the ground (1/s)
    pub ground_deceleration: f32,
    /// Lerp rate toward the target speed in the air (1/s)
    pub air_acceleration: f32,
    /// Lerp rate toward zero in the air (1/s)
    pub air_deceleration: f32,

    /// Length of the downward feet probe
    pub ground_detection_ray_length: f32,
    /// Length (and thickness) of the upward head probe
    pub head_detection_ray_length: f32,
    /// Head probe width as a fraction of the body width (0.0-1.0)
    pub head_width: f32,

    /// Apex height of a full jump
    pub jump_height: f32,
    /// Scales `jump_height` into the height the arc is drawn with
    pub jump_height_compensation_factor: f32,
    /// Seconds from take-off to the apex
    pub time_till_jump_apex: f32,
    /// Gravity scale once the jump is released or past the apex
    pub gravity_on_release_multiplier: f32,
    /// Terminal fall speed (positive)
    pub max_fall_speed: f32,
    /// Jump credits available between landings
    pub number_of_jumps_allowed: u8,

    /// Seconds over which an early release bleeds upward speed to zero
    pub time_for_upwards_cancel: f32,

    /// Normalized apex progress (0.0-1.0) at which the hang starts
    pub apex_threshold: f32,
    /// Seconds of zero vertical speed at the apex
    pub apex_hang_time: f32,

    /// Seconds an early jump press stays armed
    pub jump_buffer_time: f32,
    /// Seconds after leaving a ledge during which a ground jump is still allowed
    pub jump_coyote_time: f32,
}

impl Default for MovementStats {
    fn default() -> Self {
        Self {
            max_walk_speed: 12.5,
            max_run_speed: 20.0,
            ground_acceleration: 5.0,
            ground_deceleration: 20.0,
            air_acceleration: 5.0,
            air_deceleration: 20.0,
            ground_detection_ray_length: 0.02,
            head_detection_ray_length: 0.2,
            head_width: 0.75,
            jump_height: 6.5,
            jump_height_compensation_factor: 1.054,
            time_till_jump_apex: 0.35,
            gravity_on_release_multiplier: 2.0,
            max_fall_speed: 26.0,
            number_of_jumps_allowed: 2,
            time_for_upwards_cancel: 0.027,
            apex_threshold: 0.97,
            apex_hang_time: 0.075,
            jump_buffer_time: 0.125,
            jump_coyote_time: 0.1,
        }
    }
}

fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

impl MovementStats {
    /// Parses a stats record from RON text.
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        ron_options()
            .from_str(contents)
            .map_err(|source| ConfigError::Parse {
                path: "<inline>".to_string(),
                source,
            })
    }

    /// Reads and parses a stats record from a RON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file_name = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: file_name.clone(),
            source,
        })?;

        ron_options()
            .from_str(&contents)
            .map_err(|source| ConfigError::Parse {
                path: file_name,
                source,
            })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // Gravity divides by the apex time squared.
        require_positive("time_till_jump_apex", self.time_till_jump_apex)?;
        require_positive("jump_height", self.jump_height)?;

        require_positive("max_walk_speed", self.max_walk_speed)?;
        require_positive("max_run_speed", self.max_run_speed)?;
        require_positive("ground_acceleration", self.ground_acceleration)?;
        require_positive("ground_deceleration", self.ground_deceleration)?;
        require_positive("air_acceleration", self.air_acceleration)?;
        require_positive("air_deceleration", self.air_deceleration)?;
        require_positive("max_fall_speed", self.max_fall_speed)?;
        require_positive(
            "jump_height_compensation_factor",
            self.jump_height_compensation_factor,
        )?;
        require_positive(
            "gravity_on_release_multiplier",
            self.gravity_on_release_multiplier,
        )?;
        require_positive("time_for_upwards_cancel", self.time_for_upwards_cancel)?;
        require_positive(
            "ground_detection_ray_length",
            self.ground_detection_ray_length,
        )?;
        require_positive("head_detection_ray_length", self.head_detection_ray_length)?;

        require_unit("apex_threshold", self.apex_threshold)?;
        require_unit("head_width", self.head_width)?;

        require_non_negative("apex_hang_time", self.apex_hang_time)?;
        require_non_negative("jump_buffer_time", self.jump_buffer_time)?;
        require_non_negative("jump_coyote_time", self.jump_coyote_time)?;

        if self.number_of_jumps_allowed < 1 {
            return Err(ConfigError::InvalidConfig {
                field: "number_of_jumps_allowed",
                reason: "must be at least 1",
            });
        }

        Ok(())
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidConfig {
            field,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(ConfigError::InvalidConfig {
            field,
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidConfig {
            field,
            reason: "must be a finite value >= 0",
        });
    }
    Ok(())
}

fn require_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidConfig {
            field,
            reason: "must be within [0, 1]",
        });
    }
    Ok(())
}

/// Validated movement parameters with derived jump physics.
///
/// The source stats are private so every change goes through
/// [`MovementParams::reconfigure`], which recomputes `gravity` and
/// `initial_jump_velocity` in the same step.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct MovementParams {
    stats: MovementStats,
    gravity: f32,
    initial_jump_velocity: f32,
    adjusted_jump_height: f32,
}

impl Default for MovementParams {
    fn default() -> Self {
        let stats = MovementStats::default();
        let (gravity, initial_jump_velocity, adjusted_jump_height) = derive(&stats);
        Self {
            stats,
            gravity,
            initial_jump_velocity,
            adjusted_jump_height,
        }
    }
}

fn derive(stats: &MovementStats) -> (f32, f32, f32) {
    let gravity = (-2.0 * stats.jump_height) / stats.time_till_jump_apex.powi(2);
    let initial_jump_velocity = gravity.abs() * stats.time_till_jump_apex;
    let adjusted_jump_height = stats.jump_height * stats.jump_height_compensation_factor;
    (gravity, initial_jump_velocity, adjusted_jump_height)
}

impl MovementParams {
    /// Validates `stats` and derives gravity and take-off velocity.
    pub fn configure(stats: MovementStats) -> Result<Self, ConfigError> {
        stats.validate()?;
        let (gravity, initial_jump_velocity, adjusted_jump_height) = derive(&stats);
        Ok(Self {
            stats,
            gravity,
            initial_jump_velocity,
            adjusted_jump_height,
        })
    }

    /// Replaces the stats in place. On error the current block is kept.
    pub fn reconfigure(&mut self, stats: MovementStats) -> Result<(), ConfigError> {
        *self = Self::configure(stats)?;
        Ok(())
    }

    /// Applies `f` to a copy of the stats and reconfigures with the result.
    pub fn edit(&mut self, f: impl FnOnce(&mut MovementStats)) -> Result<(), ConfigError> {
        let mut stats = self.stats.clone();
        f(&mut stats);
        self.reconfigure(stats)
    }

    pub fn stats(&self) -> &MovementStats {
        &self.stats
    }

    /// Downward acceleration (negative).
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Upward speed at take-off.
    pub fn initial_jump_velocity(&self) -> f32 {
        self.initial_jump_velocity
    }

    pub fn adjusted_jump_height(&self) -> f32 {
        self.adjusted_jump_height
    }

    /// Samples the uncut jump trajectory starting at `start`.
    ///
    /// The ascent uses plain gravity, the apex holds for `apex_hang_time` and
    /// the descent uses the release multiplier capped at `max_fall_speed`.
    /// `resolution` is the number of samples per `time_till_jump_apex`;
    /// `steps` is the number of points returned. A negative
    /// `horizontal_speed` draws the arc to the left.
    pub fn jump_arc(
        &self,
        start: Vec2,
        horizontal_speed: f32,
        resolution: usize,
        steps: usize,
    ) -> Vec<Vec2> {
        let stats = &self.stats;
        let sample_dt = stats.time_till_jump_apex / resolution.max(1) as f32;
        let apex_time = stats.time_till_jump_apex;
        let hang_end = apex_time + stats.apex_hang_time;
        let fall_gravity = self.gravity * stats.gravity_on_release_multiplier;
        let terminal_time = stats.max_fall_speed / fall_gravity.abs();

        (0..steps)
            .map(|i| {
                let t = i as f32 * sample_dt;
                let y = if t < apex_time {
                    self.initial_jump_velocity * t + 0.5 * self.gravity * t * t
                } else if t < hang_end {
                    stats.jump_height
                } else {
                    let fall = t - hang_end;
                    if fall < terminal_time {
                        stats.jump_height + 0.5 * fall_gravity * fall * fall
                    } else {
                        stats.jump_height + 0.5 * fall_gravity * terminal_time * terminal_time
                            - stats.max_fall_speed * (fall - terminal_time)
                    }
                };
                start + Vec2::new(horizontal_speed * t, y)
            })
            .collect()
    }
}

/// Asks every character to reload its stats from a RON file
#[derive(Message, Clone, Debug)]
pub struct ReloadMovementStats {
    pub path: PathBuf,
}

/// Applies `ReloadMovementStats` requests; a bad file keeps the old parameters
pub fn reload_movement_stats(
    mut reader: MessageReader<ReloadMovementStats>,
    mut query: Query<&mut MovementParams>,
) {
    for request in reader.read() {
        let params = match MovementStats::load(&request.path).and_then(MovementParams::configure) {
            Ok(params) => params,
            Err(e) => {
                warn!("Keeping current movement stats: {}", e);
                continue;
            }
        };

        for mut current in &mut query {
            *current = params.clone();
        }

        info!(
            "Reloaded movement stats from {}: gravity={}, initial_jump_velocity={}",
            request.path.display(),
            params.gravity(),
            params.initial_jump_velocity()
        );
    }
}
