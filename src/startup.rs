use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

use crate::{
    collaborator::{ControlReporter, NotificationSink, PlayerSource},
    config::Config,
    error::Error,
    scheduler::{ControlScheduler, QueuedCheckRunner},
    service::{
        control::ControlService,
        reconciliation::{ReconciliationConfig, ReconciliationService},
    },
    worker::{
        ControlJobHandler, PlayerGateway, RateLimiterConfig, RequestQueue, RequestQueueConfig,
    },
};

/// Install the global tracing subscriber, filtered by `RUST_LOG` (default `info`)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// External collaborators alliance control is wired to.
pub struct Collaborators {
    pub source: Arc<dyn PlayerSource>,
    pub reporter: Arc<dyn ControlReporter>,
    pub notifier: Option<Arc<dyn NotificationSink>>,
}

/// Running alliance control components.
pub struct ControlRuntime {
    pub db: DatabaseConnection,
    pub queue: RequestQueue,
    pub scheduler: ControlScheduler,
}

impl ControlRuntime {
    pub fn control(&self) -> ControlService<'_> {
        ControlService::new(&self.db, &self.queue)
    }

    /// Stop the scheduler, then the request queue.
    pub async fn shutdown(&self) -> Result<(), Error> {
        self.scheduler.shutdown().await?;
        self.queue.stop().await;

        Ok(())
    }
}

/// Build the request queue, reconciliation engine and scheduler, then start them.
pub async fn start_control(
    config: &Config,
    db: DatabaseConnection,
    collaborators: Collaborators,
) -> Result<ControlRuntime, Error> {
    let Collaborators {
        source,
        reporter,
        notifier,
    } = collaborators;

    let gateway = Arc::new(PlayerGateway::new(
        source,
        RateLimiterConfig::new(config.request_spacing, config.rate_limit_backoff),
    ));

    let reconciliation = Arc::new(ReconciliationService::new(
        db.clone(),
        Arc::clone(&gateway),
        notifier,
        ReconciliationConfig::new(config.global_admin_id, config.max_backoff_per_pass),
    ));

    let handler = ControlJobHandler::new(reconciliation, Some(Arc::clone(&reporter)));
    let queue = RequestQueue::new(RequestQueueConfig::new(), gateway, handler);
    queue.start().await;

    let runner = Arc::new(QueuedCheckRunner::new(queue.clone(), reporter));
    let scheduler = ControlScheduler::new(db.clone(), runner);
    scheduler.start().await?;

    tracing::info!("Alliance control started");

    Ok(ControlRuntime {
        db,
        queue,
        scheduler,
    })
}
