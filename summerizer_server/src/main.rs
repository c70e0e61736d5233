mod auth;
mod custom_prompt;
mod docs;
mod error;
mod info;
mod middlewares;
mod router;
mod state;
mod summarizer;

use std::env;

use dotenvy::dotenv;
use router::router;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let server_domain = env::var("SERVER_DOMAIN").unwrap_or("localhost:3000".to_string());

    let app = router()?;

    let listener = tokio::net::TcpListener::bind(&server_domain).await?;
    log::info!("Listening on {}", server_domain);

    axum::serve(listener, app).await?;

    Ok(())
}
