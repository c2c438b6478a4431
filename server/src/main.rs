use tokio::net::TcpListener;

use todo_server::config::Config;
use todo_server::store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let db = store::open(&config.database_url)?;

    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "server started");
    todo_server::run(listener, db).await?;
    Ok(())
}
