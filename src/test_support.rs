//! In-memory repositories for driving the full router in tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Utc};

use crate::domain::entities::{
    DEFAULT_STATE, Group, GroupChanges, GroupRef, MemberRef, NewGroup, NewUser, User, UserPatch,
};
use crate::domain::repositories::{GroupRepository, UserRepository};
use crate::error::AppError;
use crate::i18n::{Locale, Message, Rule};
use crate::routes::router;
use crate::state::AppState;

struct StoredUser {
    first_name: String,
    last_name: Option<String>,
    email: String,
    password_hash: String,
    state: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    next_group_id: i64,
    next_user_id: i64,
    groups: BTreeMap<i64, String>,
    users: BTreeMap<i64, StoredUser>,
    /// `(group_id, user_id)`
    memberships: BTreeSet<(i64, i64)>,
}

impl Tables {
    fn group(&self, id: i64) -> Option<Group> {
        let name = self.groups.get(&id)?;
        let users = self
            .memberships
            .iter()
            .filter(|(group_id, _)| *group_id == id)
            .filter_map(|(_, user_id)| {
                self.users.get(user_id).map(|u| MemberRef {
                    id: *user_id,
                    first_name: u.first_name.clone(),
                })
            })
            .collect();
        Some(Group::new(id, name.clone(), users))
    }

    fn user(&self, id: i64) -> Option<User> {
        let stored = self.users.get(&id)?;
        let groups = self
            .memberships
            .iter()
            .filter(|(_, user_id)| *user_id == id)
            .filter_map(|(group_id, _)| {
                self.groups.get(group_id).map(|name| GroupRef {
                    id: *group_id,
                    name: name.clone(),
                })
            })
            .collect();
        Some(User {
            id,
            first_name: stored.first_name.clone(),
            last_name: stored.last_name.clone(),
            email: stored.email.clone(),
            password_hash: stored.password_hash.clone(),
            state: stored.state.clone(),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            groups,
        })
    }

    fn email_in_use(&self, email: &str, except_id: Option<i64>) -> bool {
        self.users
            .iter()
            .any(|(id, u)| u.email == email && Some(*id) != except_id)
    }
}

/// Stand-in for PostgreSQL implementing both repository traits with the same
/// constraints: unique email, membership rows cascading on either side.
#[derive(Default, Clone)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }
}

#[async_trait]
impl GroupRepository for MemoryStore {
    async fn create(&self, new_group: NewGroup) -> Result<Group, AppError> {
        let mut t = self.tables();
        t.next_group_id += 1;
        let id = t.next_group_id;
        t.groups.insert(id, new_group.name.clone());
        Ok(Group::new(id, new_group.name, Vec::new()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, AppError> {
        Ok(self.tables().group(id))
    }

    async fn list(&self) -> Result<Vec<Group>, AppError> {
        let t = self.tables();
        Ok(t.groups.keys().filter_map(|id| t.group(*id)).collect())
    }

    async fn update(&self, id: i64, changes: GroupChanges) -> Result<Group, AppError> {
        let mut t = self.tables();
        let Some(name) = t.groups.get_mut(&id) else {
            return Err(AppError::not_found(Message::GroupNotFound));
        };
        if let Some(new_name) = changes.name {
            *name = new_name;
        }
        t.group(id)
            .ok_or_else(|| AppError::not_found(Message::GroupNotFound))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut t = self.tables();
        if t.groups.remove(&id).is_none() {
            return Err(AppError::not_found(Message::GroupNotFound));
        }
        t.memberships.retain(|(group_id, _)| *group_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut t = self.tables();
        if t.email_in_use(&new_user.email, None) {
            return Err(AppError::invalid("email", Rule::Unique));
        }
        if let Some(group_id) = new_user.group_id
            && !t.groups.contains_key(&group_id)
        {
            return Err(AppError::invalid("group_id", Rule::Exists));
        }

        t.next_user_id += 1;
        let id = t.next_user_id;
        let now = Utc::now();
        t.users.insert(
            id,
            StoredUser {
                first_name: new_user.first_name,
                last_name: new_user.last_name,
                email: new_user.email,
                password_hash: new_user.password_hash,
                state: DEFAULT_STATE.to_string(),
                created_at: now,
                updated_at: now,
            },
        );
        if let Some(group_id) = new_user.group_id {
            t.memberships.insert((group_id, id));
        }

        t.user(id)
            .ok_or_else(|| AppError::internal("inserted user vanished"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.tables().user(id))
    }

    async fn find_by_first_name(&self, first_name: &str) -> Result<Option<User>, AppError> {
        let t = self.tables();
        let id = t
            .users
            .iter()
            .find(|(_, u)| u.first_name == first_name)
            .map(|(id, _)| *id);
        Ok(id.and_then(|id| t.user(id)))
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let t = self.tables();
        Ok(t.users.keys().filter_map(|id| t.user(*id)).collect())
    }

    async fn email_exists(&self, email: &str, except_id: Option<i64>) -> Result<bool, AppError> {
        Ok(self.tables().email_in_use(email, except_id))
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let mut t = self.tables();
        if let Some(email) = patch.email.as_deref()
            && t.email_in_use(email, Some(id))
        {
            return Err(AppError::invalid("email", Rule::Unique));
        }
        let Some(stored) = t.users.get_mut(&id) else {
            return Err(AppError::not_found(Message::UserNotFound));
        };

        if let Some(v) = patch.first_name {
            stored.first_name = v;
        }
        if let Some(v) = patch.last_name {
            stored.last_name = v;
        }
        if let Some(v) = patch.email {
            stored.email = v;
        }
        if let Some(v) = patch.state {
            stored.state = v;
        }
        if let Some(v) = patch.password_hash {
            stored.password_hash = v;
        }
        stored.updated_at = Utc::now();

        t.user(id)
            .ok_or_else(|| AppError::not_found(Message::UserNotFound))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut t = self.tables();
        if t.users.remove(&id).is_none() {
            return Err(AppError::not_found(Message::UserNotFound));
        }
        t.memberships.retain(|(_, user_id)| *user_id != id);
        Ok(())
    }
}

/// Application state over a fresh [`MemoryStore`].
pub fn memory_state() -> AppState {
    memory_state_with_locale(Locale::En)
}

pub fn memory_state_with_locale(default_locale: Locale) -> AppState {
    let store = Arc::new(MemoryStore::default());
    AppState::new(store.clone(), store, default_locale)
}

/// Test server over the full API router.
pub fn json_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}
