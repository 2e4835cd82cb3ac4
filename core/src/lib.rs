//! EcoGuard navigation and session-state core.
//!
//! Platform-agnostic pieces shared by every screen:
//! - `controller`: screen router, splash timer, session bootstrap and auth
//!   event handling
//! - `theme`: light/dark store and its presentation side channel
//! - `session`: the Session Gateway contract and auth event kinds
//! - `events`: ordered fan-out used by gateway implementations
//! - `runtime`: the spawn/timer seam to the host event loop
//! - `validation`: credential rules both client and server enforce

pub mod cell;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod runtime;
pub mod screen;
pub mod session;
pub mod theme;
pub mod user;
pub mod validation;

pub use cell::{LocalCell, StateCell};
pub use config::{ControllerConfig, SplashPolicy};
pub use controller::{NavigationController, Navigator};
pub use error::GatewayError;
pub use events::AuthEventHub;
pub use runtime::Spawner;
pub use screen::{NavTab, ScreenId, NAV_TABS};
pub use session::{
    AuthEvent, AuthHandler, AuthSubscription, ProfileAttributes, Session, SessionGateway,
    SessionUser,
};
pub use theme::{PresentationTarget, Theme, ThemeStore};
pub use user::UserSummary;
pub use validation::{check_credentials, CredentialError, MIN_PASSWORD_LEN};
