use std::sync::Arc;

use crate::blogs::store_blog;
use crate::config::Config;
use crate::core::db::MemoryStore;
use crate::core::helpers::{hash_password, new_id};
use crate::models::models::{Blog, TokenClaims, User};
use crate::state::AppContext;

pub fn context() -> AppContext {
    let config = Config {
        bind_addr: "127.0.0.1:0".to_string(),
        secret: "test-secret".to_string(),
    };
    AppContext::new(config, Arc::new(MemoryStore::new()))
}

pub fn seed_user(ctx: &AppContext, username: &str, password: &str) -> User {
    let user = User {
        id: new_id(),
        username: username.to_string(),
        name: None,
        password_hash: hash_password(password).unwrap(),
        blogs: Vec::new(),
    };
    ctx.users().insert(&user).unwrap();
    user
}

pub fn seed_blog(
    ctx: &AppContext,
    owner: &User,
    title: &str,
    author: Option<&str>,
    likes: u64,
) -> Blog {
    let blog = Blog {
        id: new_id(),
        title: title.to_string(),
        author: author.map(str::to_string),
        url: format!("http://blog.example.com/{}", new_id()),
        likes,
        user: owner.id.clone(),
    };
    store_blog(ctx, &owner.id, &blog).unwrap();
    blog
}

pub fn bearer_for(ctx: &AppContext, user: &User) -> String {
    let token = ctx
        .tokens
        .issue(&TokenClaims {
            username: user.username.clone(),
            id: user.id.clone(),
        })
        .unwrap();
    format!("Bearer {}", token)
}
