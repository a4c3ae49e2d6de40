use serde::Deserialize;

use crate::config::{user_key, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH, USERS_LIST_KEY};
use crate::core::db::{JsonStore, KvStore};
use crate::core::errors::ApiError;
use crate::core::helpers::{hash_password, new_id};
use crate::models::models::{BlogSummary, User, UserProfile, UserView};
use crate::state::AppContext;

/// Repository over `user:<id>` documents and the `users_list` index.
pub struct UserStore<'a> {
    store: &'a dyn KvStore,
}

impl<'a> UserStore<'a> {
    pub fn new(store: &'a dyn KvStore) -> Self {
        Self { store }
    }

    fn ids(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.store.get_json(USERS_LIST_KEY)?.unwrap_or_default())
    }

    pub fn get(&self, id: &str) -> anyhow::Result<Option<User>> {
        self.store.get_json(&user_key(id))
    }

    pub fn all(&self) -> anyhow::Result<Vec<User>> {
        let mut users = Vec::new();
        for id in self.ids()? {
            if let Some(u) = self.get(&id)? {
                users.push(u);
            }
        }
        Ok(users)
    }

    pub fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        for id in self.ids()? {
            if let Some(u) = self.get(&id)? {
                if u.username == username {
                    return Ok(Some(u));
                }
            }
        }
        Ok(None)
    }

    /// Store a new user and append it to the index. Callers hold
    /// [`AppContext::write_lock`].
    pub fn insert(&self, user: &User) -> anyhow::Result<()> {
        self.store.set_json(&user_key(&user.id), user)?;

        let mut ids = self.ids()?;
        ids.push(user.id.clone());
        self.store.set_json(USERS_LIST_KEY, &ids)
    }

    pub fn save(&self, user: &User) -> anyhow::Result<()> {
        self.store.set_json(&user_key(&user.id), user)
    }
}

#[derive(Debug, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

pub fn create_user(ctx: &AppContext, new_user: NewUser) -> Result<UserProfile, ApiError> {
    let username = new_user.username.unwrap_or_default();
    let password = new_user.password.unwrap_or_default();

    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(ApiError::bad_request(format!(
            "username must be at least {} characters long",
            MIN_USERNAME_LENGTH
        )));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::bad_request(format!(
            "password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }

    let user = User {
        id: new_id(),
        username,
        name: new_user.name,
        password_hash: hash_password(&password)?,
        blogs: Vec::new(),
    };

    {
        // uniqueness check and insert under one lock
        let _guard = ctx.write_lock();
        let users = ctx.users();
        if users.find_by_username(&user.username)?.is_some() {
            return Err(ApiError::bad_request("expected `username` to be unique"));
        }
        users.insert(&user)?;
    }

    tracing::info!(user_id = %user.id, username = %user.username, "user created");

    Ok(user.profile())
}

pub fn list_users(ctx: &AppContext) -> Result<Vec<UserView>, ApiError> {
    let blogs = ctx.blogs();
    let mut views = Vec::new();

    for user in ctx.users().all()? {
        let mut owned = Vec::with_capacity(user.blogs.len());
        for id in &user.blogs {
            if let Some(blog) = blogs.get(id)? {
                owned.push(BlogSummary::from(blog));
            }
        }
        views.push(UserView {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs: owned,
        });
    }

    Ok(views)
}
