use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Row, Transaction};

#[derive(Debug, Clone)]
pub struct ParkedChargeEvent {
    pub processor_charge_id: String,
    pub event_type: String,
    pub event_created: DateTime<Utc>,
}

#[derive(Clone)]
pub struct EventsRepo {
    pub pool: PgPool,
}

impl EventsRepo {
    /// The ledger insert is the deduplication mechanism: a duplicate event id
    /// returns false and must be acknowledged without reapplying its effect.
    pub async fn insert_tx(
        tx: &mut Transaction<'_, Postgres>,
        event_id: &str,
        event_type: &str,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO webhook_events (event_id, event_type)
            VALUES ($1, $2)
            ON CONFLICT (event_id) DO NOTHING
            "#,
        )
        .bind(event_id)
        .bind(event_type)
        .execute(tx.as_mut())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn mark_processed_tx(tx: &mut Transaction<'_, Postgres>, event_id: &str) -> Result<()> {
        sqlx::query("UPDATE webhook_events SET processed_at = now() WHERE event_id = $1")
            .bind(event_id)
            .execute(tx.as_mut())
            .await?;

        Ok(())
    }

    /// Charge events that raced ahead of the synchronous charge-id persist
    /// are parked here and replayed once the id lands.
    pub async fn park_charge_event_tx(
        tx: &mut Transaction<'_, Postgres>,
        charge_id: &str,
        event_type: &str,
        event_created: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO unlinked_charge_events (processor_charge_id, event_type, event_created)
            VALUES ($1, $2, $3)
            ON CONFLICT (processor_charge_id, event_type) DO NOTHING
            "#,
        )
        .bind(charge_id)
        .bind(event_type)
        .bind(event_created)
        .execute(tx.as_mut())
        .await?;

        Ok(())
    }

    pub async fn take_parked_for_charge_tx(
        tx: &mut Transaction<'_, Postgres>,
        charge_id: &str,
    ) -> Result<Vec<ParkedChargeEvent>> {
        let rows = sqlx::query(
            r#"
            DELETE FROM unlinked_charge_events
            WHERE processor_charge_id = $1
            RETURNING processor_charge_id, event_type, event_created
            "#,
        )
        .bind(charge_id)
        .fetch_all(tx.as_mut())
        .await?;

        let mut events: Vec<ParkedChargeEvent> = rows
            .into_iter()
            .map(|r| ParkedChargeEvent {
                processor_charge_id: r.get("processor_charge_id"),
                event_type: r.get("event_type"),
                event_created: r.get("event_created"),
            })
            .collect();
        events.sort_by_key(|e| e.event_created);

        Ok(events)
    }
}
