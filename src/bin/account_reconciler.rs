use anyhow::Result;
use marketplace_payments::config::AppConfig;
use marketplace_payments::repo::accounts_repo::AccountsRepo;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

// Re-polls accounts the webhook stream has not touched recently and applies
// capabilities through the same timestamp-guarded path the webhook processor
// uses, so a missed delivery cannot strand an account.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&cfg.database_url)
        .await?;

    let accounts_repo = AccountsRepo { pool };
    let processor = marketplace_payments::processor::build_from_config(&cfg);

    loop {
        let cutoff = chrono::Utc::now() - chrono::Duration::hours(6);
        let stale = accounts_repo.stale_accounts(cutoff, 50).await?;

        for account_id in stale {
            match processor.retrieve_account(&account_id).await {
                Ok(update) => {
                    let applied = accounts_repo
                        .apply_capabilities(&account_id, &update, chrono::Utc::now())
                        .await?;
                    if applied {
                        tracing::info!(account_id = %account_id, "account reconciled");
                    }
                }
                Err(e) => {
                    tracing::warn!(account_id = %account_id, error = %e, "reconciliation poll failed");
                }
            }
        }

        tokio::time::sleep(std::time::Duration::from_secs(300)).await;
    }
}
