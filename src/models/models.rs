use serde::{Deserialize, Serialize};

/// Stored blog document. `user` holds the owner's id.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Blog {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub url: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub user: String,
}

/// Stored user document. Never serialized to clients directly.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub password_hash: String,
    #[serde(default)]
    pub blogs: Vec<String>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            username: self.username.clone(),
            name: self.name.clone(),
            blogs: self.blogs.clone(),
        }
    }

    pub fn owner_summary(&self) -> OwnerSummary {
        OwnerSummary {
            id: self.id.clone(),
            username: self.username.clone(),
            name: self.name.clone(),
        }
    }
}

/// Public user shape returned on registration.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<String>,
}

/// Owner fields attached to a listed blog.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OwnerSummary {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
}

/// Blog as listed, with the owner expanded. `user` is null when the owner no longer exists.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BlogView {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub url: String,
    pub likes: u64,
    pub user: Option<OwnerSummary>,
}

impl BlogView {
    pub fn new(blog: Blog, owner: Option<OwnerSummary>) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: owner,
        }
    }
}

/// Blog fields shown inside a user listing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BlogSummary {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub url: String,
    pub likes: u64,
}

impl From<Blog> for BlogSummary {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
        }
    }
}

/// User as listed, with owned blogs expanded.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<BlogSummary>,
}

/// Claims carried inside an identity token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TokenClaims {
    pub username: String,
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
    pub id: String,
}
