//! Role-driven presentation glue.
//!
//! Decides the first screen after start-up and which dashboard (with its fixed
//! menu) a signed-in user sees.

use fitlife_core::credential::CredentialStore;
use fitlife_core::error::Result;
use fitlife_core::role::{ROLE_STAT, UserRole};
use fitlife_core::session::Session;
use std::fmt;
use std::sync::Arc;

/// Top-level destination chosen at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => f.write_str("login"),
            Route::Home => f.write_str("home"),
        }
    }
}

/// `Home` for a logged-in session with a known email, `Login` otherwise.
pub fn initial_route(session: &Session) -> Route {
    if session.is_logged_in && session.email().is_some() {
        Route::Home
    } else {
        Route::Login
    }
}

/// One entry of a dashboard menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: &'static str,
    pub label: &'static str,
}

const fn entry(id: &'static str, label: &'static str) -> MenuEntry {
    MenuEntry { id, label }
}

const MEMBER_MENU: &[MenuEntry] = &[
    entry("profile", "Profile"),
    entry("trainer", "Trainer"),
    entry("training_plan", "Training plan"),
    entry("nutrition_plan", "Nutrition plan"),
    entry("progress", "Progress"),
];

const TRAINER_MENU: &[MenuEntry] = &[
    entry("profile", "Profile"),
    entry("clients", "My clients"),
    entry("create_routine", "Create routine"),
    entry("session_history", "Session history"),
];

const NUTRITIONIST_MENU: &[MenuEntry] = &[
    entry("profile", "Profile"),
    entry("clients", "My clients"),
    entry("meal_plans", "Meal plans"),
    entry("measurements", "Measurement history"),
];

const ADMIN_MENU: &[MenuEntry] = &[
    entry("profile", "Profile"),
    entry("users", "User management"),
    entry("reports", "Global reports"),
    entry("settings", "System settings"),
];

/// The dashboard variant shown for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dashboard {
    pub role: UserRole,
    pub title: &'static str,
    pub menu: &'static [MenuEntry],
}

impl Dashboard {
    pub fn for_role(role: UserRole) -> Self {
        let (title, menu) = match role {
            UserRole::Member => ("My training", MEMBER_MENU),
            UserRole::Trainer => ("Trainer panel", TRAINER_MENU),
            UserRole::Nutritionist => ("Nutrition panel", NUTRITIONIST_MENU),
            UserRole::Admin => ("Administration", ADMIN_MENU),
        };
        Self { role, title, menu }
    }
}

/// Reads and writes the per-user role stat.
#[derive(Clone)]
pub struct RoleDirectory {
    store: Arc<dyn CredentialStore>,
}

impl RoleDirectory {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Role stored for `email`, [`UserRole::Member`] when none is stored.
    pub async fn role_of(&self, email: &str) -> Result<UserRole> {
        let raw = self.store.get_user_stat(email, ROLE_STAT).await?;
        Ok(UserRole::parse(raw.as_deref()))
    }

    pub async fn set_role(&self, email: &str, role: UserRole) -> Result<()> {
        self.store
            .save_user_stat(email, ROLE_STAT, role.as_str())
            .await?;
        tracing::info!(email, role = role.as_str(), "Role updated");
        Ok(())
    }

    /// Dashboard for the session's user; sessions without an email get the
    /// member dashboard.
    pub async fn dashboard_for(&self, session: &Session) -> Result<Dashboard> {
        let role = match session.email() {
            Some(email) => self.role_of(email).await?,
            None => UserRole::default(),
        };
        Ok(Dashboard::for_role(role))
    }
}
