use std::sync::Arc;

use crate::config::{Config, LogFormat};
use budgetpace_core::{
    budget::{BudgetService, BudgetServiceTrait},
    reserves::{ReserveService, ReserveServiceTrait},
    spending::{SpendingService, SpendingServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
};
use budgetpace_storage_sqlite::{
    db::{self, spawn_writer},
    BudgetSettingsRepository, ReserveRepository, TransactionRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub budget_service: Arc<dyn BudgetServiceTrait + Send + Sync>,
    pub spending_service: Arc<dyn SpendingServiceTrait + Send + Sync>,
    pub transaction_service: Arc<dyn TransactionServiceTrait + Send + Sync>,
    pub reserve_service: Arc<dyn ReserveServiceTrait + Send + Sync>,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let reserve_repo = Arc::new(ReserveRepository::new(pool.clone(), writer.clone()));
    let settings_repo = Arc::new(BudgetSettingsRepository::new(pool.clone(), writer.clone()));

    let budget_service = Arc::new(BudgetService::new(
        transaction_repo.clone(),
        reserve_repo.clone(),
        settings_repo,
    ));
    let spending_service = Arc::new(SpendingService::new(transaction_repo.clone()));
    let transaction_service = Arc::new(TransactionService::new(transaction_repo));
    let reserve_service = Arc::new(ReserveService::new(reserve_repo));

    Ok(Arc::new(AppState {
        budget_service,
        spending_service,
        transaction_service,
        reserve_service,
    }))
}
