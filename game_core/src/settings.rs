use thiserror::Error;

/// Named colours offered on the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    White,
    Yellow,
    Cyan,
    Orange,
    Red,
    Blue,
    Green,
    Magenta,
}

impl PaletteColor {
    /// Case-insensitive lookup. Anything unrecognised is White.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "yellow" => PaletteColor::Yellow,
            "cyan" => PaletteColor::Cyan,
            "orange" => PaletteColor::Orange,
            "red" => PaletteColor::Red,
            "blue" => PaletteColor::Blue,
            "green" => PaletteColor::Green,
            "magenta" => PaletteColor::Magenta,
            _ => PaletteColor::White,
        }
    }

    /// 8-bit sRGB components
    pub fn rgb8(self) -> [u8; 3] {
        match self {
            PaletteColor::White => [255, 255, 255],
            PaletteColor::Yellow => [255, 255, 0],
            PaletteColor::Cyan => [0, 255, 255],
            PaletteColor::Orange => [255, 200, 0],
            PaletteColor::Red => [255, 0, 0],
            PaletteColor::Blue => [0, 0, 255],
            PaletteColor::Green => [0, 255, 0],
            PaletteColor::Magenta => [255, 0, 255],
        }
    }

    /// Linear RGBA for an sRGB render target
    pub fn rgba(self) -> [f32; 4] {
        let [r, g, b] = self.rgb8();
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), 1.0]
    }
}

/// Convert one 8-bit sRGB channel to linear light
pub fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("score limit must be one of 5, 11 or 21 (got {0})")]
    InvalidScoreLimit(u32),
}

/// Match options chosen before play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub ball_color: PaletteColor,
    pub paddle1_color: PaletteColor,
    pub paddle2_color: PaletteColor,
    pub score_limit: u32,
    pub sound_enabled: bool,
}

impl Settings {
    pub const SCORE_LIMITS: [u32; 3] = [5, 11, 21];

    pub fn from_names(
        ball: &str,
        paddle1: &str,
        paddle2: &str,
        score_limit: u32,
        sound_enabled: bool,
    ) -> Result<Self, SettingsError> {
        if !Self::SCORE_LIMITS.contains(&score_limit) {
            return Err(SettingsError::InvalidScoreLimit(score_limit));
        }
        Ok(Self {
            ball_color: PaletteColor::from_name(ball),
            paddle1_color: PaletteColor::from_name(paddle1),
            paddle2_color: PaletteColor::from_name(paddle2),
            score_limit,
            sound_enabled,
        })
    }

    pub fn paddle_color(&self, side: crate::Side) -> PaletteColor {
        match side {
            crate::Side::Left => self.paddle1_color,
            crate::Side::Right => self.paddle2_color,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_color: PaletteColor::White,
            paddle1_color: PaletteColor::White,
            paddle2_color: PaletteColor::White,
            score_limit: crate::Params::DEFAULT_SCORE_LIMIT as u32,
            sound_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Side;

    #[test]
    fn test_unknown_color_maps_to_white() {
        assert_eq!(PaletteColor::from_name("Chartreuse"), PaletteColor::White);
        assert_eq!(PaletteColor::from_name(""), PaletteColor::White);
        assert_eq!(PaletteColor::from_name("cyan"), PaletteColor::Cyan);
        assert_eq!(PaletteColor::from_name("Magenta"), PaletteColor::Magenta);
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.score_limit, 11);
        assert!(settings.sound_enabled);
        assert_eq!(settings.ball_color, PaletteColor::White);
    }

    #[test]
    fn test_from_names() {
        let settings = Settings::from_names("Orange", "Red", "Blue", 21, false).unwrap();
        assert_eq!(settings.ball_color, PaletteColor::Orange);
        assert_eq!(settings.paddle_color(Side::Left), PaletteColor::Red);
        assert_eq!(settings.paddle_color(Side::Right), PaletteColor::Blue);
        assert_eq!(settings.score_limit, 21);
        assert!(!settings.sound_enabled);
    }

    #[test]
    fn test_rejects_unlisted_score_limit() {
        assert_eq!(
            Settings::from_names("White", "White", "White", 7, true),
            Err(SettingsError::InvalidScoreLimit(7))
        );
    }

    #[test]
    fn test_linear_color_endpoints() {
        assert_eq!(PaletteColor::White.rgba(), [1.0, 1.0, 1.0, 1.0]);
        let blue = PaletteColor::Blue.rgba();
        assert_eq!(blue[0], 0.0);
        assert_eq!(blue[2], 1.0);
        let orange = PaletteColor::Orange.rgba();
        assert!(orange[1] > 0.5 && orange[1] < 0.6);
    }
}
