use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub level_count: u32,
    pub hints_per_level: u32,
    /// Hints added by each refill request.
    pub hint_refill: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            level_count: 100,
            hints_per_level: 3,
            hint_refill: 2,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.level_count == 0 {
            return Err(Error::InvalidConfig("level_count must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"hints_per_level": 5}"#).unwrap();
        assert_eq!(config.hints_per_level, 5);
        assert_eq!(config.hint_refill, 2);
        assert_eq!(config.level_count, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_levels_is_invalid() {
        let config = GameConfig {
            level_count: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(Error::InvalidConfig("level_count must be positive"))
        );
    }
}
