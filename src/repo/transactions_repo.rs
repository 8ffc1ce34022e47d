use crate::domain::transaction::TransactionStatus;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

pub struct TransactionRecordInput {
    pub transaction_id: Uuid,
    pub booking_id: Uuid,
    pub customer_id: Uuid,
    pub provider_id: Uuid,
    pub account_id: String,
    pub gross_amount_minor: i64,
    pub platform_fee_minor: i64,
    pub currency: String,
}

#[derive(Debug, Clone)]
pub struct StoredTransaction {
    pub transaction_id: Uuid,
    pub booking_id: Uuid,
    pub customer_id: Uuid,
    pub provider_id: Uuid,
    pub account_id: String,
    pub gross_amount_minor: i64,
    pub platform_fee_minor: i64,
    pub currency: String,
    pub processor_charge_id: Option<String>,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub finalized_at: Option<DateTime<Utc>>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Conflict,
}

#[derive(Clone)]
pub struct TransactionsRepo {
    pub pool: PgPool,
}

impl TransactionsRepo {
    /// The partial unique index on (booking_id) WHERE status <> 'FAILED'
    /// serializes concurrent checkouts; the losing insert returns Conflict.
    pub async fn insert_pending(&self, input: &TransactionRecordInput) -> Result<InsertOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO booking_transactions (
                transaction_id, booking_id, customer_id, provider_id, account_id,
                gross_amount_minor, platform_fee_minor, currency, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'PENDING')
            "#,
        )
        .bind(input.transaction_id)
        .bind(input.booking_id)
        .bind(input.customer_id)
        .bind(input.provider_id)
        .bind(&input.account_id)
        .bind(input.gross_amount_minor)
        .bind(input.platform_fee_minor)
        .bind(&input.currency)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Ok(InsertOutcome::Conflict),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get(&self, transaction_id: Uuid) -> Result<Option<StoredTransaction>> {
        let row = sqlx::query(&select_sql("WHERE transaction_id = $1"))
            .bind(transaction_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(map_transaction))
    }

    pub async fn find_active_by_booking(&self, booking_id: Uuid) -> Result<Option<StoredTransaction>> {
        let row = sqlx::query(&select_sql("WHERE booking_id = $1 AND status <> 'FAILED'"))
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(map_transaction))
    }

    pub async fn latest_by_booking(&self, booking_id: Uuid) -> Result<Option<StoredTransaction>> {
        let row = sqlx::query(&select_sql(
            "WHERE booking_id = $1 ORDER BY created_at DESC LIMIT 1",
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(map_transaction))
    }

    /// Set at most once; immutable thereafter.
    pub async fn set_processor_charge_id(&self, transaction_id: Uuid, charge_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE booking_transactions
            SET processor_charge_id = $2
            WHERE transaction_id = $1 AND processor_charge_id IS NULL
            "#,
        )
        .bind(transaction_id)
        .bind(charge_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn mark_failed(&self, transaction_id: Uuid, error_message: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE booking_transactions
            SET status = 'FAILED', error_message = $2, finalized_at = now()
            WHERE transaction_id = $1 AND status = 'PENDING'
            "#,
        )
        .bind(transaction_id)
        .bind(error_message)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn exists_by_charge_tx(
        tx: &mut Transaction<'_, Postgres>,
        charge_id: &str,
    ) -> Result<bool> {
        let row = sqlx::query("SELECT 1 AS one FROM booking_transactions WHERE processor_charge_id = $1")
            .bind(charge_id)
            .fetch_optional(tx.as_mut())
            .await?;

        Ok(row.is_some())
    }

    /// Webhook-driven finalization. Succeeded/Failed apply only to PENDING
    /// rows; Refunded also supersedes Succeeded and is terminal. Returns
    /// whether a row transitioned.
    pub async fn finalize_by_charge_tx(
        tx: &mut Transaction<'_, Postgres>,
        charge_id: &str,
        status: TransactionStatus,
        finalized_at: DateTime<Utc>,
    ) -> Result<bool> {
        let from_states = match status {
            TransactionStatus::Refunded => "('PENDING', 'SUCCEEDED')",
            _ => "('PENDING')",
        };
        let sql = format!(
            r#"
            UPDATE booking_transactions
            SET status = $2, finalized_at = $3
            WHERE processor_charge_id = $1 AND status IN {from_states}
            "#,
        );

        let result = sqlx::query(&sql)
            .bind(charge_id)
            .bind(status.as_str())
            .bind(finalized_at)
            .execute(tx.as_mut())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn select_sql(filter: &str) -> String {
    format!(
        r#"
        SELECT transaction_id, booking_id, customer_id, provider_id, account_id,
               gross_amount_minor, platform_fee_minor, currency, processor_charge_id,
               status, created_at, finalized_at
        FROM booking_transactions
        {filter}
        "#,
    )
}

fn map_transaction(row: PgRow) -> StoredTransaction {
    let status: String = row.get("status");
    StoredTransaction {
        transaction_id: row.get("transaction_id"),
        booking_id: row.get("booking_id"),
        customer_id: row.get("customer_id"),
        provider_id: row.get("provider_id"),
        account_id: row.get("account_id"),
        gross_amount_minor: row.get("gross_amount_minor"),
        platform_fee_minor: row.get("platform_fee_minor"),
        currency: row.get("currency"),
        processor_charge_id: row.get("processor_charge_id"),
        status: TransactionStatus::parse(&status),
        created_at: row.get("created_at"),
        finalized_at: row.get("finalized_at"),
    }
}
