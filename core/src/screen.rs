use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Every full-page view the application can show.
///
/// The set is closed: asking for a screen that does not exist is a compile
/// error rather than something the navigation layer has to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScreenId {
    #[default]
    Splash,
    Onboarding,
    Login,
    Register,
    Home,
    Challenges,
    Statistics,
    Community,
    Profile,
    Settings,
    Notifications,
    EcoTips,
    Terms,
    PhotoChallenge,
    Friends,
    Chat,
    CreateChallenge,
    EditProfile,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown screen: {0}")]
pub struct ParseScreenError(pub String);

impl ScreenId {
    pub const ALL: [ScreenId; 18] = [
        ScreenId::Splash,
        ScreenId::Onboarding,
        ScreenId::Login,
        ScreenId::Register,
        ScreenId::Home,
        ScreenId::Challenges,
        ScreenId::Statistics,
        ScreenId::Community,
        ScreenId::Profile,
        ScreenId::Settings,
        ScreenId::Notifications,
        ScreenId::EcoTips,
        ScreenId::Terms,
        ScreenId::PhotoChallenge,
        ScreenId::Friends,
        ScreenId::Chat,
        ScreenId::CreateChallenge,
        ScreenId::EditProfile,
    ];

    /// Stable wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Splash => "splash",
            Self::Onboarding => "onboarding",
            Self::Login => "login",
            Self::Register => "register",
            Self::Home => "home",
            Self::Challenges => "challenges",
            Self::Statistics => "statistics",
            Self::Community => "community",
            Self::Profile => "profile",
            Self::Settings => "settings",
            Self::Notifications => "notifications",
            Self::EcoTips => "ecoTips",
            Self::Terms => "terms",
            Self::PhotoChallenge => "photoChallenge",
            Self::Friends => "friends",
            Self::Chat => "chat",
            Self::CreateChallenge => "createChallenge",
            Self::EditProfile => "editProfile",
        }
    }

    /// Whether the bottom navigation bar is rendered under this screen.
    pub fn shows_bottom_nav(&self) -> bool {
        matches!(
            self,
            Self::Home
                | Self::Challenges
                | Self::Statistics
                | Self::Community
                | Self::Profile
                | Self::Notifications
                | Self::EcoTips
                | Self::Friends
        )
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenId {
    type Err = ParseScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|screen| screen.as_str() == s)
            .ok_or_else(|| ParseScreenError(s.to_string()))
    }
}

/// One entry of the bottom navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavTab {
    pub screen: ScreenId,
    pub label: &'static str,
    pub icon: &'static str,
}

impl NavTab {
    pub fn is_active(&self, current: ScreenId) -> bool {
        self.screen == current
    }
}

pub const NAV_TABS: [NavTab; 5] = [
    NavTab {
        screen: ScreenId::Home,
        label: "Home",
        icon: "home",
    },
    NavTab {
        screen: ScreenId::Challenges,
        label: "Challenges",
        icon: "trophy",
    },
    NavTab {
        screen: ScreenId::Statistics,
        label: "Stats",
        icon: "chart",
    },
    NavTab {
        screen: ScreenId::Community,
        label: "Community",
        icon: "users",
    },
    NavTab {
        screen: ScreenId::Profile,
        label: "Profile",
        icon: "user",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_parse_back() {
        for screen in ScreenId::ALL {
            assert_eq!(screen.as_str().parse::<ScreenId>(), Ok(screen));
        }
        assert_eq!(
            "eco_tips".parse::<ScreenId>(),
            Err(ParseScreenError("eco_tips".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&ScreenId::PhotoChallenge).unwrap();
        assert_eq!(json, "\"photoChallenge\"");
        let back: ScreenId = serde_json::from_str("\"editProfile\"").unwrap();
        assert_eq!(back, ScreenId::EditProfile);
    }

    #[test]
    fn test_tabs_show_bottom_nav() {
        for tab in NAV_TABS {
            assert!(tab.screen.shows_bottom_nav(), "{} hides the nav", tab.screen);
        }
        assert!(!ScreenId::Splash.shows_bottom_nav());
        assert!(!ScreenId::Login.shows_bottom_nav());
    }

    #[test]
    fn test_active_tab() {
        let active: Vec<NavTab> = NAV_TABS
            .into_iter()
            .filter(|tab| tab.is_active(ScreenId::Community))
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "Community");
        assert!(NAV_TABS.iter().all(|tab| !tab.is_active(ScreenId::Settings)));
    }
}
