// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use mailer::{Mailer, MailerOptions};
use openai_client::OpenAIClient;
use server_core::domains::auth::PostgresUserStore;
use server_core::domains::chat::PostgresChatLog;
use server_core::kernel::{
    EmailSender, LogOnlyEmailSender, OpenAiCompletionProvider, Outbox, PgVectorKnowledgeIndex,
    ServerDeps, SmtpEmailSender,
};
use server_core::server::build_app;
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Chatterbox API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Email delivery: SMTP when configured, log sink otherwise
    let email_sender: Arc<dyn EmailSender> = match &config.smtp {
        Some(smtp) => {
            let mailer = Mailer::new(MailerOptions {
                smtp_host: smtp.host.clone(),
                smtp_port: smtp.port,
                username: smtp.sender.clone(),
                password: smtp.password.clone(),
                sender: smtp.sender.clone(),
            })
            .context("Failed to create SMTP mailer")?;
            Arc::new(SmtpEmailSender::new(mailer))
        }
        None => {
            tracing::warn!("SMTP not configured, outbound email will only be logged");
            Arc::new(LogOnlyEmailSender)
        }
    };
    let outbox = Outbox::spawn(email_sender);

    // OpenAI client backs both completions and the knowledge index
    let openai = OpenAIClient::new(config.openai_api_key.clone());

    let deps = ServerDeps::new(
        Arc::new(PostgresUserStore::new(pool.clone())),
        Arc::new(PostgresChatLog::new(pool.clone())),
        Arc::new(OpenAiCompletionProvider::new(openai.clone())),
        Arc::new(PgVectorKnowledgeIndex::new(pool.clone(), openai)),
        outbox,
        config.app_url.clone(),
    );

    // Build application
    let app = build_app(pool, deps);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Status check: http://localhost:{}/api/status", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
