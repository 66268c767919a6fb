//! Shared application state injected into every handler.

use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::{GroupService, UserService};
use crate::domain::repositories::{GroupRepository, UserRepository};
use crate::i18n::Locale;
use crate::infrastructure::persistence::{PgGroupRepository, PgUserRepository};

/// Group service over any repository implementation.
pub type DynGroupService = GroupService<dyn GroupRepository>;

/// User service over any repository implementations.
pub type DynUserService = UserService<dyn UserRepository, dyn GroupRepository>;

#[derive(Clone)]
pub struct AppState {
    pub group_service: Arc<DynGroupService>,
    pub user_service: Arc<DynUserService>,
    /// Locale used when `Accept-Language` names none we support.
    pub default_locale: Locale,
}

impl AppState {
    /// Wires services over the given repositories.
    pub fn new(
        users: Arc<dyn UserRepository>,
        groups: Arc<dyn GroupRepository>,
        default_locale: Locale,
    ) -> Self {
        let group_service = Arc::new(GroupService::new(groups));
        let user_service = Arc::new(UserService::new(users, group_service.clone()));

        Self {
            group_service,
            user_service,
            default_locale,
        }
    }

    /// Wires services over the PostgreSQL repositories.
    pub fn from_pool(pool: Arc<PgPool>, default_locale: Locale) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgGroupRepository::new(pool)),
            default_locale,
        )
    }
}
