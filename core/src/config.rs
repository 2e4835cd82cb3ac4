use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::theme::Theme;

/// How the splash timer treats a session that was found before it fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplashPolicy {
    /// The timer does nothing once a session-driven transition was applied.
    #[default]
    YieldToSession,
    /// The timer always moves to onboarding, even over `home`.
    LastWriterWins,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub splash_delay_ms: u64,
    pub splash_policy: SplashPolicy,
    pub initial_theme: Theme,
}

impl ControllerConfig {
    pub fn splash_delay(&self) -> Duration {
        Duration::from_millis(self.splash_delay_ms)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            splash_delay_ms: 2500,
            splash_policy: SplashPolicy::YieldToSession,
            initial_theme: Theme::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: ControllerConfig =
            serde_json::from_str(r#"{"splash_policy":"last_writer_wins"}"#).unwrap();
        assert_eq!(config.splash_policy, SplashPolicy::LastWriterWins);
        assert_eq!(config.splash_delay(), Duration::from_millis(2500));
        assert_eq!(config.initial_theme, Theme::Light);
    }
}
