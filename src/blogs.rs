use std::collections::HashMap;

use serde::Deserialize;

use crate::auth::authenticate;
use crate::config::{blog_key, BLOGS_LIST_KEY};
use crate::core::db::{JsonStore, KvStore};
use crate::core::errors::ApiError;
use crate::core::helpers::{new_id, validate_id};
use crate::models::models::{Blog, BlogView, OwnerSummary, User};
use crate::state::AppContext;

const BLOG_NOT_FOUND: &str = "blog not found";

/// Repository over `blog:<id>` documents and the `blogs_list` index.
pub struct BlogStore<'a> {
    store: &'a dyn KvStore,
}

impl<'a> BlogStore<'a> {
    pub fn new(store: &'a dyn KvStore) -> Self {
        Self { store }
    }

    fn ids(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.store.get_json(BLOGS_LIST_KEY)?.unwrap_or_default())
    }

    pub fn get(&self, id: &str) -> anyhow::Result<Option<Blog>> {
        self.store.get_json(&blog_key(id))
    }

    /// All blogs in insertion order.
    pub fn all(&self) -> anyhow::Result<Vec<Blog>> {
        let mut blogs = Vec::new();
        for id in self.ids()? {
            if let Some(b) = self.get(&id)? {
                blogs.push(b);
            }
        }
        Ok(blogs)
    }

    /// Store a new blog and append it to the index. Callers hold
    /// [`AppContext::write_lock`].
    pub fn insert(&self, blog: &Blog) -> anyhow::Result<()> {
        self.store.set_json(&blog_key(&blog.id), blog)?;

        let mut ids = self.ids()?;
        ids.push(blog.id.clone());
        self.store.set_json(BLOGS_LIST_KEY, &ids)
    }

    pub fn update(&self, blog: &Blog) -> anyhow::Result<()> {
        self.store.set_json(&blog_key(&blog.id), blog)
    }

    /// Callers hold [`AppContext::write_lock`].
    pub fn remove(&self, id: &str) -> anyhow::Result<()> {
        self.store.delete(&blog_key(id))?;

        let mut ids = self.ids()?;
        ids.retain(|b| b != id);
        self.store.set_json(BLOGS_LIST_KEY, &ids)
    }
}

#[derive(Debug, Deserialize)]
pub struct NewBlog {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub likes: Option<u64>,
}

/// Replacement fields for `PUT /api/blogs/:id`. Any owner sent along is ignored.
#[derive(Debug, Deserialize)]
pub struct BlogUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub likes: Option<u64>,
}

fn required_title_and_url(
    title: Option<String>,
    url: Option<String>,
) -> Result<(String, String), ApiError> {
    match (title, url) {
        (Some(title), Some(url)) if !title.is_empty() && !url.is_empty() => Ok((title, url)),
        _ => Err(ApiError::bad_request("title or url missing")),
    }
}

pub fn list_blogs(ctx: &AppContext) -> Result<Vec<BlogView>, ApiError> {
    let users = ctx.users();
    let mut owners: HashMap<String, Option<OwnerSummary>> = HashMap::new();
    let mut views = Vec::new();

    for blog in ctx.blogs().all()? {
        let owner = match owners.get(&blog.user) {
            Some(owner) => owner.clone(),
            None => {
                let owner = users.get(&blog.user)?.map(|u| u.owner_summary());
                owners.insert(blog.user.clone(), owner.clone());
                owner
            }
        };
        views.push(BlogView::new(blog, owner));
    }

    Ok(views)
}

pub fn get_blog(ctx: &AppContext, id: &str) -> Result<BlogView, ApiError> {
    validate_id(id)?;

    let blog = ctx
        .blogs()
        .get(id)?
        .ok_or_else(|| ApiError::not_found(BLOG_NOT_FOUND))?;
    let owner = ctx.users().get(&blog.user)?.map(|u| u.owner_summary());

    Ok(BlogView::new(blog, owner))
}

/// Save the blog, then link it from its owner.
///
/// These are two separate writes. If the second fails the blog stays stored
/// without appearing in the owner's list; nothing is rolled back. The owner is
/// re-read under the write lock so concurrent creates keep every link.
pub(crate) fn store_blog(ctx: &AppContext, owner_id: &str, blog: &Blog) -> anyhow::Result<()> {
    let _guard = ctx.write_lock();

    let users = ctx.users();
    let mut owner: User = users
        .get(owner_id)?
        .ok_or_else(|| anyhow::anyhow!("owner {} not found", owner_id))?;

    ctx.blogs().insert(blog)?;
    owner.blogs.push(blog.id.clone());
    users.save(&owner)
}

pub fn create_blog(
    ctx: &AppContext,
    authorization: Option<&str>,
    new_blog: NewBlog,
) -> Result<Blog, ApiError> {
    let owner = authenticate(ctx, authorization)?;
    let (title, url) = required_title_and_url(new_blog.title, new_blog.url)?;

    let blog = Blog {
        id: new_id(),
        title,
        author: new_blog.author,
        url,
        likes: new_blog.likes.unwrap_or(0),
        user: owner.id.clone(),
    };
    store_blog(ctx, &owner.id, &blog)?;

    tracing::info!(blog_id = %blog.id, user_id = %blog.user, "blog created");

    Ok(blog)
}

/// Replace title, author, url and likes. The stored like count is one more
/// than the submitted value.
pub fn update_blog(ctx: &AppContext, id: &str, update: BlogUpdate) -> Result<Blog, ApiError> {
    validate_id(id)?;

    let blogs = ctx.blogs();
    let mut blog = blogs
        .get(id)?
        .ok_or_else(|| ApiError::not_found(BLOG_NOT_FOUND))?;

    let (title, url) = required_title_and_url(update.title, update.url)?;
    let likes = update
        .likes
        .ok_or_else(|| ApiError::bad_request("likes missing"))?;

    blog.title = title;
    blog.author = update.author;
    blog.url = url;
    blog.likes = likes
        .checked_add(1)
        .ok_or_else(|| ApiError::bad_request("likes out of range"))?;
    blogs.update(&blog)?;

    tracing::info!(blog_id = %blog.id, likes = blog.likes, "blog updated");

    Ok(blog)
}

/// Delete a blog on behalf of its owner. A missing blog is reported, never
/// treated as already deleted.
pub fn delete_blog(
    ctx: &AppContext,
    authorization: Option<&str>,
    id: &str,
) -> Result<(), ApiError> {
    let user = authenticate(ctx, authorization)?;
    validate_id(id)?;

    let blogs = ctx.blogs();
    let blog = blogs
        .get(id)?
        .ok_or_else(|| ApiError::not_found(BLOG_NOT_FOUND))?;

    if blog.user != user.id {
        tracing::info!(blog_id = %id, user_id = %user.id, "delete refused for non-owner");
        return Err(ApiError::unauthorized("unauthorized action"));
    }

    {
        let _guard = ctx.write_lock();
        blogs.remove(id)?;

        let users = ctx.users();
        if let Some(mut owner) = users.get(&user.id)? {
            owner.blogs.retain(|b| b != id);
            users.save(&owner)?;
        }
    }

    tracing::info!(blog_id = %id, user_id = %user.id, "blog deleted");

    Ok(())
}
