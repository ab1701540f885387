//! Service wiring: config in, router out.

use axum::Router;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tower_http::timeout::TimeoutLayer;

use rentwise::adapters::auth::JwtActorValidator;
use rentwise::adapters::email::{ResendConfig, ResendEmailProvider};
use rentwise::adapters::embedding::{
    UnconfiguredEmbeddingBackend, WorkersAiConfig, WorkersAiEmbeddingBackend,
};
use rentwise::adapters::http::{app_router, AuthState, ToolsAppState};
use rentwise::adapters::learning::TracingLearningSink;
use rentwise::adapters::notifications::{
    LogNotificationDispatcher, WebhookConfig, WebhookNotificationDispatcher,
};
use rentwise::adapters::postgres::{
    PostgresDecisionReader, PostgresPreferenceStore, PostgresPropertyReader,
    PostgresRecipientDirectory, PostgresWorkflowStateReader,
};
use rentwise::application::handlers::{
    EmailContextGuard, EmbeddingService, GetPropertyHandler, ListPropertiesHandler,
    RecallPreferencesHandler, RememberPreferenceHandler, SearchPrecedentHandler, SemanticMemory,
    SendEmailHandler, SendNotificationHandler, ToolDispatcher, WorkflowOrchestrator,
    WorkflowToolHandler,
};
use rentwise::config::{AppConfig, ConfigError, ValidationError};
use rentwise::domain::foundation::DomainError;
use rentwise::domain::tools::ToolName;
use rentwise::ports::{EmbeddingBackend, EmbeddingError, NotificationDispatcher};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migrations failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Adapter setup failed: {0}")]
    Adapter(#[from] DomainError),

    #[error("Embedding backend setup failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// A wired application ready to serve.
pub struct App {
    pub addr: SocketAddr,
    pub router: Router,
}

/// Connects to the database and builds the router from config.
pub async fn bootstrap(config: &AppConfig) -> Result<App, StartupError> {
    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let dispatcher = build_dispatcher(config, pool)?;
    tracing::info!(
        implemented = dispatcher.implemented_count(),
        catalogued = dispatcher.registry().len(),
        "Tool dispatcher ready"
    );

    let tools_state = ToolsAppState {
        dispatcher: Arc::new(dispatcher),
        verbose_errors: config.features.verbose_errors,
    };
    let auth_state: AuthState = Arc::new(JwtActorValidator::from_config(&config.auth));

    let router = app_router(tools_state, auth_state)
        .layer(TimeoutLayer::new(config.server.request_timeout()));

    Ok(App {
        addr: config.server.socket_addr()?,
        router,
    })
}

fn build_dispatcher(config: &AppConfig, pool: PgPool) -> Result<ToolDispatcher, StartupError> {
    let notifier = notifier(config)?;
    let memory = Arc::new(semantic_memory(config, &pool)?);

    let guard = Arc::new(EmailContextGuard::new(
        config.email.sender_identity(),
        Arc::new(PostgresRecipientDirectory::new(pool.clone())),
    ));
    let email_provider = Arc::new(ResendEmailProvider::new(ResendConfig::from_app_config(
        &config.email,
    ))?);

    let orchestrator = Arc::new(
        WorkflowOrchestrator::new(
            Arc::new(PostgresWorkflowStateReader::new(pool.clone())),
            config.workflow.settings(),
        )
        .with_notifier(notifier.clone()),
    );
    let properties = Arc::new(PostgresPropertyReader::new(pool));

    let mut dispatcher = ToolDispatcher::new()
        .register(
            ToolName::GetProperty,
            Arc::new(GetPropertyHandler::new(properties.clone())),
        )
        .register(
            ToolName::ListProperties,
            Arc::new(ListPropertiesHandler::new(properties)),
        )
        .register(
            ToolName::SendEmail,
            Arc::new(SendEmailHandler::new(guard, email_provider).with_notifier(notifier.clone())),
        )
        .register(
            ToolName::SendNotification,
            Arc::new(SendNotificationHandler::new(notifier)),
        )
        .register(
            ToolName::RememberPreference,
            Arc::new(RememberPreferenceHandler::new(memory.clone())),
        )
        .register(
            ToolName::RecallPreferences,
            Arc::new(RecallPreferencesHandler::new(memory.clone())),
        )
        .register(
            ToolName::SearchPrecedent,
            Arc::new(SearchPrecedentHandler::new(memory)),
        )
        .register_all(
            &WorkflowToolHandler::tools(),
            Arc::new(WorkflowToolHandler::new(orchestrator)),
        );

    if config.features.enable_learning {
        dispatcher = dispatcher.with_learning_sink(Arc::new(TracingLearningSink));
    }

    Ok(dispatcher)
}

fn semantic_memory(config: &AppConfig, pool: &PgPool) -> Result<SemanticMemory, StartupError> {
    let backend: Arc<dyn EmbeddingBackend> = match WorkersAiConfig::from_app_config(&config.embedding) {
        Some(workers) => Arc::new(WorkersAiEmbeddingBackend::new(workers)?),
        None => {
            tracing::warn!("Embedding backend not configured; memory search uses fallbacks only");
            Arc::new(UnconfiguredEmbeddingBackend)
        }
    };

    let embeddings = Arc::new(EmbeddingService::new(
        backend,
        config.embedding.dimensions,
        config.embedding.max_input_chars,
    ));

    Ok(SemanticMemory::new(
        embeddings,
        Arc::new(PostgresPreferenceStore::new(pool.clone())),
        Arc::new(PostgresDecisionReader::new(pool.clone())),
        config.memory.limits(),
    )
    .with_semantic_enabled(
        config.features.enable_semantic_memory && config.embedding.is_configured(),
    ))
}

fn notifier(config: &AppConfig) -> Result<Arc<dyn NotificationDispatcher>, StartupError> {
    match WebhookConfig::from_app_config(&config.notifications) {
        Some(webhook) => Ok(Arc::new(WebhookNotificationDispatcher::new(webhook)?)),
        None => {
            tracing::info!("No notification webhook configured; notifications are logged");
            Ok(Arc::new(LogNotificationDispatcher))
        }
    }
}
