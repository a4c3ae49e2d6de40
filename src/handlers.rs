//! actix-web routes for the native server.

use actix_cors::Cors;
use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};

use crate::auth::{self, LoginRequest};
use crate::blogs::{self, BlogUpdate, NewBlog};
use crate::core::errors::ApiError;
use crate::core::helpers::parse_json;
use crate::state::AppContext;
use crate::users::{self, NewUser};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/blogs", web::get().to(list_blogs))
            .route("/blogs", web::post().to(create_blog))
            .route("/blogs/{id}", web::get().to(get_blog))
            .route("/blogs/{id}", web::put().to(update_blog))
            .route("/blogs/{id}", web::delete().to(delete_blog))
            .route("/users", web::get().to(list_users))
            .route("/users", web::post().to(create_user))
            .route("/login", web::post().to(login)),
    )
    .default_service(web::to(unknown_endpoint));
}

/// Permissive CORS for browser clients served from another origin.
pub fn cors() -> Cors {
    Cors::permissive()
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status().as_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("application/json")
            .body(self.body())
    }
}

fn authorization(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Run a handler on the blocking pool. Store access and password hashing are synchronous.
async fn run<T, F>(ctx: web::Data<AppContext>, handler: F) -> Result<T, ApiError>
where
    F: FnOnce(&AppContext) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    web::block(move || handler(ctx.get_ref()))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("blocking task failed: {}", e)))?
}

async fn list_blogs(ctx: web::Data<AppContext>) -> Result<HttpResponse, ApiError> {
    let blogs = run(ctx, blogs::list_blogs).await?;
    Ok(HttpResponse::Ok().json(blogs))
}

async fn get_blog(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let blog = run(ctx, move |ctx| blogs::get_blog(ctx, &id)).await?;
    Ok(HttpResponse::Ok().json(blog))
}

async fn create_blog(
    ctx: web::Data<AppContext>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let payload: NewBlog = parse_json(&body)?;
    let auth = authorization(&req);
    let blog = run(ctx, move |ctx| blogs::create_blog(ctx, auth.as_deref(), payload)).await?;
    Ok(HttpResponse::Created().json(blog))
}

async fn update_blog(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let payload: BlogUpdate = parse_json(&body)?;
    let blog = run(ctx, move |ctx| blogs::update_blog(ctx, &id, payload)).await?;
    Ok(HttpResponse::Ok().json(blog))
}

async fn delete_blog(
    ctx: web::Data<AppContext>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let auth = authorization(&req);
    run(ctx, move |ctx| blogs::delete_blog(ctx, auth.as_deref(), &id)).await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn list_users(ctx: web::Data<AppContext>) -> Result<HttpResponse, ApiError> {
    let users = run(ctx, users::list_users).await?;
    Ok(HttpResponse::Ok().json(users))
}

async fn create_user(
    ctx: web::Data<AppContext>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let payload: NewUser = parse_json(&body)?;
    let user = run(ctx, move |ctx| users::create_user(ctx, payload)).await?;
    Ok(HttpResponse::Created().json(user))
}

async fn login(ctx: web::Data<AppContext>, body: web::Bytes) -> Result<HttpResponse, ApiError> {
    let payload: LoginRequest = parse_json(&body)?;
    let resp = run(ctx, move |ctx| auth::login_user(ctx, payload)).await?;
    Ok(HttpResponse::Ok().json(resp))
}

async fn unknown_endpoint() -> Result<HttpResponse, ApiError> {
    Err(ApiError::not_found("unknown endpoint"))
}
