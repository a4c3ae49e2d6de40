//! Blog list REST API.
//!
//! Handlers in [`blogs`], [`users`] and [`auth`] are plain functions over an
//! [`AppContext`]. The native server ([`handlers`], actix-web) and the Spin
//! component (below, wasm32 only) are thin adapters around them.

pub mod auth;
pub mod blogs;
pub mod config;
pub mod list_helper;
pub mod state;
pub mod users;

pub mod core {
    pub mod db;
    pub mod errors;
    pub mod helpers;
}

pub mod models {
    pub mod models;
}

#[cfg(not(target_arch = "wasm32"))]
pub mod handlers;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::config::Config;
pub use crate::core::db::{KvStore, MemoryStore};
pub use crate::core::errors::ApiError;
pub use crate::state::AppContext;

// === Spin component entrypoint ===
#[cfg(target_arch = "wasm32")]
mod component {
    use std::sync::Arc;

    use serde::Serialize;
    use spin_sdk::http::{IntoResponse, Request, Response};
    use spin_sdk::http_component;

    use crate::core::db::SpinStore;
    use crate::core::errors::ApiError;
    use crate::core::helpers::parse_json;
    use crate::{auth, blogs, users, AppContext, Config};

    fn json<T: Serialize>(status: u16, value: &T) -> Result<Response, ApiError> {
        Ok(Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(serde_json::to_vec(value)?)
            .build())
    }

    fn route(ctx: &AppContext, req: &Request) -> Result<Response, ApiError> {
        let method = req.method().to_string();
        let path = req.path();
        let authorization = req.header("Authorization").and_then(|h| h.as_str());

        if method == "OPTIONS" {
            return Ok(Response::builder()
                .status(204)
                .header("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS")
                .header("Access-Control-Allow-Headers", "Authorization, Content-Type")
                .build());
        }

        if let Some(id) = path.strip_prefix("/api/blogs/") {
            return match method.as_str() {
                "GET" => json(200, &blogs::get_blog(ctx, id)?),
                "PUT" => json(200, &blogs::update_blog(ctx, id, parse_json(req.body())?)?),
                "DELETE" => {
                    blogs::delete_blog(ctx, authorization, id)?;
                    Ok(Response::builder().status(204).build())
                }
                _ => Err(ApiError::not_found("unknown endpoint")),
            };
        }

        match (method.as_str(), path) {
            ("GET", "/api/blogs") => json(200, &blogs::list_blogs(ctx)?),
            ("POST", "/api/blogs") => {
                let payload = parse_json(req.body())?;
                json(201, &blogs::create_blog(ctx, authorization, payload)?)
            }
            ("GET", "/api/users") => json(200, &users::list_users(ctx)?),
            ("POST", "/api/users") => json(201, &users::create_user(ctx, parse_json(req.body())?)?),
            ("POST", "/api/login") => json(200, &auth::login_user(ctx, parse_json(req.body())?)?),
            _ => Err(ApiError::not_found("unknown endpoint")),
        }
    }

    #[http_component]
    fn handle(req: Request) -> anyhow::Result<impl IntoResponse> {
        let ctx = AppContext::new(Config::from_env()?, Arc::new(SpinStore));
        let mut resp = route(&ctx, &req).unwrap_or_else(Response::from);
        resp.set_header("Access-Control-Allow-Origin", "*");
        Ok(resp)
    }
}
