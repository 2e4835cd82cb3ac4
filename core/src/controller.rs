//! Screen router and auth-state synchronization.
//!
//! `Navigator` is the handle every screen receives: it reads the current
//! screen and user summary and requests transitions. `NavigationController`
//! owns the lifetime-bound pieces (splash timer, session bootstrap, auth
//! subscription) and forces transitions when the session changes.

use futures::FutureExt;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::cell::StateCell;
use crate::config::{ControllerConfig, SplashPolicy};
use crate::runtime::{spawn_timeout, Spawner, TaskGuard};
use crate::screen::ScreenId;
use crate::session::{AuthEvent, AuthHandler, AuthSubscription, Session, SessionGateway};
use crate::user::UserSummary;

/// Screen the controller forces for an auth event, if any.
pub fn screen_for_event(event: AuthEvent) -> Option<ScreenId> {
    match event {
        AuthEvent::SignedOut => Some(ScreenId::Login),
        AuthEvent::SignedIn | AuthEvent::UserUpdated => Some(ScreenId::Home),
        AuthEvent::InitialSession | AuthEvent::TokenRefreshed | AuthEvent::PasswordRecovery => {
            None
        }
    }
}

/// Read access to navigation state plus the single transition operation.
pub struct Navigator<C> {
    screen: C,
    user: Rc<UserSummary>,
}

impl<C: Clone> Clone for Navigator<C> {
    fn clone(&self) -> Self {
        Self {
            screen: self.screen.clone(),
            user: Rc::clone(&self.user),
        }
    }
}

impl<C: StateCell<ScreenId>> Navigator<C> {
    pub fn current_screen(&self) -> ScreenId {
        self.screen.get()
    }

    /// Replaces the current screen. Any screen may be requested from any
    /// other; there is no history stack.
    pub fn navigate_to(&self, screen: ScreenId) {
        debug!(to = %screen, "navigate");
        self.screen.set(screen);
    }

    /// Placeholder summary; see [`UserSummary`].
    pub fn user_data(&self) -> &UserSummary {
        &self.user
    }
}

#[derive(Debug)]
struct Flags {
    mounted: Cell<bool>,
    /// Set once the bootstrap check or an auth event forced a screen.
    session_override: Cell<bool>,
}

pub struct NavigationController<C> {
    navigator: Navigator<C>,
    flags: Rc<Flags>,
    splash_timer: Option<TaskGuard>,
    subscription: Option<Box<dyn AuthSubscription>>,
}

impl<C: StateCell<ScreenId>> NavigationController<C> {
    /// Puts `screen` on splash and starts the auth subscription, the session
    /// bootstrap check and the splash timer.
    pub fn mount<G, S>(
        config: &ControllerConfig,
        screen: C,
        user: UserSummary,
        gateway: Rc<G>,
        spawner: &S,
    ) -> Self
    where
        G: SessionGateway + ?Sized + 'static,
        S: Spawner,
    {
        screen.set(ScreenId::Splash);
        let navigator = Navigator {
            screen,
            user: Rc::new(user),
        };
        let flags = Rc::new(Flags {
            mounted: Cell::new(true),
            session_override: Cell::new(false),
        });

        let subscription = gateway.on_auth_state_change(auth_handler(&navigator, &flags));
        spawn_session_bootstrap(&navigator, &flags, gateway, spawner);
        let splash_timer = spawn_splash_timer(config, &navigator, &flags, spawner);

        info!(
            delay_ms = config.splash_delay_ms,
            policy = ?config.splash_policy,
            "navigation controller mounted"
        );

        Self {
            navigator,
            flags,
            splash_timer: Some(splash_timer),
            subscription: Some(subscription),
        }
    }

    pub fn navigator(&self) -> Navigator<C> {
        self.navigator.clone()
    }

    pub fn current_screen(&self) -> ScreenId {
        self.navigator.current_screen()
    }

    pub fn navigate_to(&self, screen: ScreenId) {
        self.navigator.navigate_to(screen);
    }
}

impl<C> NavigationController<C> {
    pub fn is_mounted(&self) -> bool {
        self.flags.mounted.get()
    }

    /// Stops every pending transition. Safe to call more than once; only the
    /// first call releases the subscription.
    pub fn teardown(&mut self) {
        if !self.flags.mounted.replace(false) {
            return;
        }

        if let Some(timer) = self.splash_timer.take() {
            timer.cancel();
        }

        if let Some(mut subscription) = self.subscription.take() {
            if let Err(e) = subscription.unsubscribe() {
                warn!("Failed to release auth subscription: {}", e);
            }
        }

        debug!("navigation controller torn down");
    }
}

impl<C> Drop for NavigationController<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn auth_handler<C>(navigator: &Navigator<C>, flags: &Rc<Flags>) -> AuthHandler
where
    C: StateCell<ScreenId>,
{
    let navigator = navigator.clone();
    let flags = Rc::clone(flags);

    Rc::new(move |event: AuthEvent, session: Option<&Session>| {
        if !flags.mounted.get() {
            return;
        }
        match screen_for_event(event) {
            Some(target) => {
                info!(
                    %event,
                    user_id = session.map(|s| s.user.id.as_str()).unwrap_or("-"),
                    to = %target,
                    "auth state changed"
                );
                flags.session_override.set(true);
                navigator.navigate_to(target);
            }
            None => debug!(%event, "auth event ignored"),
        }
    })
}

fn spawn_session_bootstrap<C, G, S>(
    navigator: &Navigator<C>,
    flags: &Rc<Flags>,
    gateway: Rc<G>,
    spawner: &S,
) where
    C: StateCell<ScreenId>,
    G: SessionGateway + ?Sized + 'static,
    S: Spawner,
{
    let navigator = navigator.clone();
    let flags = Rc::clone(flags);

    spawner.spawn_local(
        async move {
            match gateway.current_user().await {
                Ok(Some(user)) => {
                    if !flags.mounted.get() {
                        debug!("session check resolved after teardown");
                        return;
                    }
                    info!(user_id = %user.id, "existing session found");
                    flags.session_override.set(true);
                    navigator.navigate_to(ScreenId::Home);
                }
                Ok(None) => debug!("no existing session"),
                Err(e) => warn!("Session check failed, continuing without session: {}", e),
            }
        }
        .boxed_local(),
    );
}

fn spawn_splash_timer<C, S>(
    config: &ControllerConfig,
    navigator: &Navigator<C>,
    flags: &Rc<Flags>,
    spawner: &S,
) -> TaskGuard
where
    C: StateCell<ScreenId>,
    S: Spawner,
{
    let navigator = navigator.clone();
    let flags = Rc::clone(flags);
    let policy = config.splash_policy;

    spawn_timeout(spawner, config.splash_delay(), move || {
        if !flags.mounted.get() {
            return;
        }
        if policy == SplashPolicy::YieldToSession && flags.session_override.get() {
            debug!("splash timer skipped, session already routed");
            return;
        }
        navigator.navigate_to(ScreenId::Onboarding);
    })
}
