use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use av_api::app::create_app;
use av_api::config::Config;
use av_api::routes::account::AppState;
use av_core::repositories::{InMemoryUserRepository, UserRepository};
use av_core::services::verification::{OtpProviderTrait, SmsNotifierTrait};
use av_core::services::{AccountService, TokenService, VerificationService};
use av_infra::database::{DatabasePool, MySqlUserRepository};
use av_infra::otp::create_otp_provider;
use av_infra::sms::{create_sms_service, SmsNotifierAdapter};
use av_shared::config::{LogFormat, LoggingConfig};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    init_tracing(&config.app.logging);

    tracing::info!(
        environment = %config.app.environment,
        "Starting account verification API"
    );

    if let Err(problem) = config.check_production() {
        anyhow::bail!(problem);
    }
    if config.app.auth.jwt.is_using_default_secret() {
        tracing::warn!("Using the default session token secret; set JWT_SECRET");
    }

    // One provider client and one notifier per process
    let otp_provider = Arc::new(
        create_otp_provider(&config.infrastructure.otp)
            .context("Failed to initialize OTP provider")?,
    );
    let sms_notifier = Arc::new(SmsNotifierAdapter::new(create_sms_service(
        &config.infrastructure.sms,
    )));
    let token_service = Arc::new(TokenService::new(config.token_service_config()));

    if config.uses_database() {
        let database = &config.infrastructure.database;
        let pool = DatabasePool::new(database.clone())
            .await
            .context("Failed to connect to database")?;
        if database.run_migrations {
            pool.run_migrations()
                .await
                .context("Failed to run database migrations")?;
        }
        tracing::info!("{}", pool.get_statistics());

        let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
        let result = serve(&config, user_repository, otp_provider, sms_notifier, token_service).await;
        pool.close().await;
        result
    } else {
        tracing::warn!("DATABASE_URL not set, users are kept in memory");
        let user_repository = Arc::new(InMemoryUserRepository::new());
        serve(&config, user_repository, otp_provider, sms_notifier, token_service).await
    }
}

/// Wire the services around a user store and run the HTTP server
async fn serve<U, P, N>(
    config: &Config,
    user_repository: Arc<U>,
    otp_provider: Arc<P>,
    sms_notifier: Arc<N>,
    token_service: Arc<TokenService>,
) -> Result<()>
where
    U: UserRepository + 'static,
    P: OtpProviderTrait + 'static,
    N: SmsNotifierTrait + 'static,
{
    let verification_service = Arc::new(VerificationService::new(
        user_repository.clone(),
        otp_provider,
        config.verification_service_config(),
    ));

    let account_service = Arc::new(AccountService::new(
        user_repository,
        verification_service,
        sms_notifier,
        token_service.clone(),
        config.account_service_config(),
    ));

    let app_state = web::Data::new(AppState::new(account_service, token_service));

    let server_config = &config.app.server;
    let bind_address = server_config.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()))
        .keep_alive(Duration::from_secs(server_config.keep_alive));
    if server_config.workers > 0 {
        server = server.workers(server_config.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},sqlx=warn", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact().with_target(true))
            .init(),
    }
}
