#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::sync::Arc;

    use actix_web::{middleware, web, App, HttpServer};
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    use bloglist::{handlers, AppContext, Config, MemoryStore};

    pub async fn run() -> anyhow::Result<()> {
        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
            .with(tracing_subscriber::fmt::layer())
            .init();

        let config = Config::from_env()?;
        let bind_addr = config.bind_addr.clone();
        let ctx = web::Data::new(AppContext::new(config, Arc::new(MemoryStore::new())));

        tracing::info!(addr = %bind_addr, "starting server");

        HttpServer::new(move || {
            App::new()
                .wrap(handlers::cors())
                .wrap(middleware::Logger::default())
                .app_data(ctx.clone())
                .configure(handlers::configure)
        })
        .bind(&bind_addr)?
        .run()
        .await?;

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    native::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
