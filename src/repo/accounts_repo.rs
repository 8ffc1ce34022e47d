use crate::account::transitions;
use crate::domain::account::{CapabilityUpdate, ConnectedAccount, OnboardingStatus};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

#[derive(Clone)]
pub struct AccountsRepo {
    pub pool: PgPool,
}

impl AccountsRepo {
    pub async fn insert(&self, account_id: &str, provider_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO connected_accounts (account_id, provider_id, onboarding_status)
            VALUES ($1, $2, 'NOT_STARTED')
            ON CONFLICT (provider_id) DO NOTHING
            "#,
        )
        .bind(account_id)
        .bind(provider_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_by_provider(&self, provider_id: Uuid) -> Result<Option<ConnectedAccount>> {
        let row = sqlx::query(
            r#"
            SELECT account_id, provider_id, charges_enabled, payouts_enabled,
                   details_submitted, onboarding_status, last_synced_at
            FROM connected_accounts
            WHERE provider_id = $1
            "#,
        )
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(map_account))
    }

    /// NOT_STARTED -> LINK_ISSUED. Never regresses a status the webhook
    /// processor has already advanced.
    pub async fn mark_link_issued(&self, account_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE connected_accounts
            SET onboarding_status = 'LINK_ISSUED', updated_at = now()
            WHERE account_id = $1 AND onboarding_status IN ('NOT_STARTED', 'LINK_ISSUED')
            "#,
        )
        .bind(account_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Guarded last-write-wins: applies only when the event timestamp is
    /// strictly newer than the stored sync point, so a stale out-of-order
    /// event can never regress eligibility. Returns whether a row changed.
    pub async fn apply_capabilities_tx(
        tx: &mut Transaction<'_, Postgres>,
        account_id: &str,
        update: &CapabilityUpdate,
        event_ts: DateTime<Utc>,
    ) -> Result<bool> {
        let status = transitions::next_status(update);
        let result = sqlx::query(
            r#"
            UPDATE connected_accounts
            SET charges_enabled = $2,
                payouts_enabled = $3,
                details_submitted = $4,
                onboarding_status = $5,
                last_synced_at = $6,
                updated_at = now()
            WHERE account_id = $1
              AND (last_synced_at IS NULL OR last_synced_at < $6)
            "#,
        )
        .bind(account_id)
        .bind(update.charges_enabled)
        .bind(update.payouts_enabled)
        .bind(update.details_submitted)
        .bind(status.as_str())
        .bind(event_ts)
        .execute(tx.as_mut())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn apply_capabilities(
        &self,
        account_id: &str,
        update: &CapabilityUpdate,
        event_ts: DateTime<Utc>,
    ) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let applied = Self::apply_capabilities_tx(&mut tx, account_id, update, event_ts).await?;
        tx.commit().await?;
        Ok(applied)
    }

    /// Accounts the reconciliation worker should re-poll.
    pub async fn stale_accounts(&self, older_than: DateTime<Utc>, limit: i64) -> Result<Vec<String>> {
        let rows = sqlx::query(
            r#"
            SELECT account_id
            FROM connected_accounts
            WHERE onboarding_status <> 'NOT_STARTED'
              AND (last_synced_at IS NULL OR last_synced_at < $1)
            ORDER BY last_synced_at ASC NULLS FIRST
            LIMIT $2
            "#,
        )
        .bind(older_than)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.get("account_id")).collect())
    }
}

fn map_account(row: PgRow) -> ConnectedAccount {
    let status: String = row.get("onboarding_status");
    ConnectedAccount {
        account_id: row.get("account_id"),
        provider_id: row.get("provider_id"),
        charges_enabled: row.get("charges_enabled"),
        payouts_enabled: row.get("payouts_enabled"),
        details_submitted: row.get("details_submitted"),
        onboarding_status: OnboardingStatus::parse(&status),
        last_synced_at: row.get("last_synced_at"),
    }
}
