use chrono_tz::Tz;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "pigex={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let timezone = match settings.server.timezone.as_deref() {
        Some(name) => name
            .parse::<Tz>()
            .map_err(|err| format!("invalid timezone in settings: {err}"))?,
        None => chrono_tz::Asia::Manila,
    };

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    tracing::info!("Starting report service on {addr} (reporting timezone {timezone})");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    server::run_with_listener(timezone, listener).await?;

    Ok(())
}
