use anyhow::Context;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 3;

pub const USERS_LIST_KEY: &str = "users_list";
pub const BLOGS_LIST_KEY: &str = "blogs_list";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3003";

pub fn user_key(id: &str) -> String {
    format!("user:{}", id)
}

pub fn blog_key(id: &str) -> String {
    format!("blog:{}", id)
}

/// Process configuration, built once at startup and handed to [`crate::state::AppContext`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Listener address for the native server.
    pub bind_addr: String,
    /// Secret used to sign identity tokens.
    pub secret: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// - `BLOGLIST_SECRET` (required): token signing secret
    /// - `BLOGLIST_BIND_ADDR` (optional): listener address
    /// - `PORT` (optional): used as `0.0.0.0:$PORT` when no bind address is given
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("BLOGLIST_SECRET")
            .filter(|s| !s.trim().is_empty())
            .context("BLOGLIST_SECRET environment variable is required")?;

        let bind_addr = match lookup("BLOGLIST_BIND_ADDR") {
            Some(addr) if !addr.trim().is_empty() => addr,
            _ => match lookup("PORT") {
                Some(port) => {
                    let port: u16 = port
                        .trim()
                        .parse()
                        .with_context(|| format!("PORT is not a valid port number: {}", port))?;
                    format!("0.0.0.0:{}", port)
                }
                None => DEFAULT_BIND_ADDR.to_string(),
            },
        };

        tracing::debug!(bind_addr = %bind_addr, "configuration loaded");

        Ok(Self { bind_addr, secret })
    }
}
