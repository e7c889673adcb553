use serde::Deserialize;

/// Tunables for the game, optionally overridden by `square_slide.json`
/// - every field has a default, so a partial file is fine
/// - a missing or malformed file falls back to `GameConfig::default()`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// side of one grid cell in pixels
    pub cell_size: f64,
    /// length of one slide in milliseconds
    pub animation_duration: f64,
    /// touches that travel further than this many pixels are swipes, others are taps
    pub swipe_threshold: f64,
    pub move_sound: String,
    pub colours: Colours,
    pub hud_font: String,
    pub grid_line_width: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Colours {
    pub background: String,
    pub grid: String,
    pub wall: String,
    pub block: String,
    pub hud: String,
}

impl GameConfig {
    pub const PATH: &'static str = "square_slide.json";
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            cell_size: 100.0,
            animation_duration: 250.0,
            swipe_threshold: 10.0,
            move_sound: "bouncy-sound.mp3".to_string(),
            colours: Colours::default(),
            hud_font: "40px Arial".to_string(),
            grid_line_width: 2.0,
        }
    }
}

impl Default for Colours {
    fn default() -> Self {
        Colours {
            background: "#333".to_string(),
            grid: "#666".to_string(),
            wall: "#225522".to_string(),
            block: "#449944".to_string(),
            hud: "white".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_file_overrides_named_fields_only() {
        let config: GameConfig = serde_json::from_str(
            r##"{ "cell_size": 64, "colours": { "block": "#6633FF" } }"##,
        )
        .unwrap();
        assert_eq!(config.cell_size, 64.0);
        assert_eq!(config.colours.block, "#6633FF");
        assert_eq!(config.colours.wall, "#225522");
        assert_eq!(config.animation_duration, 250.0);
        assert_eq!(config.swipe_threshold, 10.0);
    }

    #[test]
    fn wrong_types_are_rejected() {
        let parsed = serde_json::from_str::<GameConfig>(r#"{ "cell_size": "big" }"#);
        assert!(parsed.is_err());
    }
}
