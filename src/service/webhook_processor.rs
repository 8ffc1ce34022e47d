use crate::domain::error::PaymentError;
use crate::domain::event::{categorize, EventCategory, ProcessorEvent};
use crate::repo::accounts_repo::AccountsRepo;
use crate::repo::events_repo::EventsRepo;
use crate::repo::transactions_repo::TransactionsRepo;
use chrono::Utc;
use sqlx::PgPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    Applied,
    Duplicate,
    Parked,
    Ignored,
}

impl ProcessOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessOutcome::Applied => "applied",
            ProcessOutcome::Duplicate => "duplicate",
            ProcessOutcome::Parked => "parked",
            ProcessOutcome::Ignored => "ignored",
        }
    }
}

#[derive(Clone)]
pub struct WebhookProcessor {
    pub pool: PgPool,
}

impl WebhookProcessor {
    /// Ledger insert and every effect of the event commit in one transaction:
    /// duplicate delivery can never double-apply, and an applied event is
    /// always recorded.
    pub async fn process(&self, event: &ProcessorEvent) -> Result<ProcessOutcome, PaymentError> {
        let mut tx = self.pool.begin().await.map_err(PaymentError::from)?;

        if !EventsRepo::insert_tx(&mut tx, &event.event_id, &event.event_type).await? {
            tx.rollback().await.map_err(PaymentError::from)?;
            tracing::debug!(event_id = %event.event_id, "duplicate webhook delivery acknowledged");
            return Ok(ProcessOutcome::Duplicate);
        }

        let outcome = match categorize(event) {
            EventCategory::AccountCapability { account_id, update } => {
                let applied =
                    AccountsRepo::apply_capabilities_tx(&mut tx, &account_id, &update, event.created)
                        .await?;
                if applied {
                    ProcessOutcome::Applied
                } else {
                    tracing::debug!(
                        event_id = %event.event_id,
                        account_id = %account_id,
                        "capability event stale or account unknown, discarded"
                    );
                    ProcessOutcome::Ignored
                }
            }
            EventCategory::Charge { charge_id, status } => {
                if TransactionsRepo::exists_by_charge_tx(&mut tx, &charge_id).await? {
                    let applied =
                        TransactionsRepo::finalize_by_charge_tx(&mut tx, &charge_id, status, Utc::now())
                            .await?;
                    if applied {
                        ProcessOutcome::Applied
                    } else {
                        ProcessOutcome::Ignored
                    }
                } else {
                    // charge created by this system but not yet linked; held
                    // for replay instead of failed
                    EventsRepo::park_charge_event_tx(&mut tx, &charge_id, &event.event_type, event.created)
                        .await?;
                    ProcessOutcome::Parked
                }
            }
            EventCategory::Unhandled => ProcessOutcome::Ignored,
        };

        EventsRepo::mark_processed_tx(&mut tx, &event.event_id).await?;
        tx.commit().await.map_err(PaymentError::from)?;

        tracing::info!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            outcome = outcome.as_str(),
            "webhook event processed"
        );

        Ok(outcome)
    }
}
