//! Command line settings and fixed game constants.

use std::path::PathBuf;

use clap::Args;
use glam::Vec2;
use thiserror::Error;

use crate::engine::RenderStyle;

/*──────────────────────────── Constants ────────────────────────────*/

pub const WINDOW_TITLE: &str = "Raycastoe";

/// Size in tiles of one board room; room `(cx, cy)` spans
/// `[c * ROOM_STRIDE, (c + 1) * ROOM_STRIDE)` on each axis.
pub const ROOM_STRIDE: f32 = 7.0;

/// Seconds the result stays on screen before the next round.
pub const GAME_OVER_SECS: f32 = 2.0;

pub const SPAWN_X: Vec2 = Vec2::new(11.5, 11.5);
pub const SPAWN_O: Vec2 = Vec2::new(15.5, 15.5);
pub const SPAWN_FACING: Vec2 = Vec2::NEG_X;

/// Height of the bottom panel in pixels.
pub const HUD_HEIGHT: usize = 140;

/*──────────────────────────── Settings ─────────────────────────────*/

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("window must be at least {min_w}x{min_h}, got {w}x{h}")]
    WindowTooSmall {
        w: usize,
        h: usize,
        min_w: usize,
        min_h: usize,
    },

    #[error("field of view must be in (0, π), got {0}")]
    Fov(f32),

    #[error("frame rate must be at least 1")]
    Fps,

    #[error("shade falloff must be positive, got {0}")]
    Falloff(f32),
}

/// Options shared by every binary.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Window width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: usize,

    /// Window height in pixels (the bottom panel included)
    #[arg(long, default_value_t = 720)]
    pub height: usize,

    /// Horizontal field of view in radians
    #[arg(long, default_value_t = 1.58)]
    pub fov: f32,

    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Map file to load instead of the built-in arena
    #[arg(long, value_name = "FILE")]
    pub map: Option<PathBuf>,

    /// Distance at which walls are drawn at half brightness
    #[arg(long, default_value_t = 10.0)]
    pub falloff: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fov: 1.58,
            fps: 60,
            map: None,
            falloff: 10.0,
        }
    }
}

impl Settings {
    pub const MIN_WIDTH: usize = 320;
    pub const MIN_HEIGHT: usize = HUD_HEIGHT + 100;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < Self::MIN_WIDTH || self.height < Self::MIN_HEIGHT {
            return Err(ConfigError::WindowTooSmall {
                w: self.width,
                h: self.height,
                min_w: Self::MIN_WIDTH,
                min_h: Self::MIN_HEIGHT,
            });
        }
        if !(self.fov > 0.0 && self.fov < std::f32::consts::PI) {
            return Err(ConfigError::Fov(self.fov));
        }
        if self.fps == 0 {
            return Err(ConfigError::Fps);
        }
        if !(self.falloff > 0.0 && self.falloff.is_finite()) {
            return Err(ConfigError::Falloff(self.falloff));
        }
        Ok(())
    }

    /// Rows left for the 3-D view above the panel.
    pub fn view_height(&self) -> usize {
        self.height.saturating_sub(HUD_HEIGHT)
    }

    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            falloff: self.falloff,
            ..RenderStyle::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        settings: Settings,
    }

    #[test]
    fn defaults_match_cli() {
        let cli = Cli::try_parse_from(["raycastoe"]).unwrap();
        assert_eq!(cli.settings, Settings::default());
        assert!(cli.settings.validate().is_ok());
        assert_eq!(cli.settings.view_height(), 580);
    }

    #[test]
    fn flags_override() {
        let cli = Cli::try_parse_from([
            "raycastoe", "--width", "800", "--height", "600", "--fov", "1.2", "--map", "a.map",
        ])
        .unwrap();
        assert_eq!(cli.settings.width, 800);
        assert_eq!(cli.settings.fov, 1.2);
        assert_eq!(cli.settings.map, Some(PathBuf::from("a.map")));
    }

    #[test]
    fn invalid_values_rejected() {
        let small = Settings {
            width: 100,
            ..Settings::default()
        };
        assert!(matches!(small.validate(), Err(ConfigError::WindowTooSmall { .. })));

        let fov = Settings {
            fov: 3.5,
            ..Settings::default()
        };
        assert_eq!(fov.validate(), Err(ConfigError::Fov(3.5)));

        let fps = Settings {
            fps: 0,
            ..Settings::default()
        };
        assert_eq!(fps.validate(), Err(ConfigError::Fps));

        let falloff = Settings {
            falloff: -1.0,
            ..Settings::default()
        };
        assert_eq!(falloff.validate(), Err(ConfigError::Falloff(-1.0)));
    }

    #[test]
    fn style_carries_falloff() {
        let s = Settings {
            falloff: 4.0,
            ..Settings::default()
        };
        assert_eq!(s.render_style().falloff, 4.0);
    }
}
