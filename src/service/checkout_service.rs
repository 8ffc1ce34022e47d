use crate::account::eligibility::{checkout_eligibility, EligibilityDecision};
use crate::domain::error::PaymentError;
use crate::domain::fee::{platform_fee_minor, FeeModel};
use crate::domain::transaction::{status_for_charge_event, CheckoutRequest, CheckoutResponse};
use crate::processor::{DestinationChargeRequest, ProcessorClient};
use crate::repo::accounts_repo::AccountsRepo;
use crate::repo::events_repo::EventsRepo;
use crate::repo::transactions_repo::{InsertOutcome, TransactionRecordInput, TransactionsRepo};
use crate::service::feature_gate::FeatureGate;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

pub const CHECKOUT_FLAG: &str = "split_checkout";

#[derive(Clone)]
pub struct CheckoutService {
    pub pool: PgPool,
    pub accounts_repo: AccountsRepo,
    pub transactions_repo: TransactionsRepo,
    pub feature_gate: FeatureGate,
    pub processor: Arc<dyn ProcessorClient>,
    pub settlement_currency: String,
    pub default_fee_bps: i64,
}

impl CheckoutService {
    pub async fn checkout(&self, req: CheckoutRequest) -> Result<CheckoutResponse, PaymentError> {
        self.validate(&req)?;

        if !self.feature_gate.is_enabled(CHECKOUT_FLAG).await {
            return Err(PaymentError::CheckoutDisabled);
        }

        let account = self
            .accounts_repo
            .get_by_provider(req.provider_id)
            .await?
            .ok_or(PaymentError::ProviderNotEligible)?;

        // eligibility is checked before any processor contact
        if let EligibilityDecision::Reject(reason) = checkout_eligibility(&account) {
            tracing::info!(provider_id = %req.provider_id, reason, "checkout blocked");
            return Err(PaymentError::ProviderNotEligible);
        }

        if self
            .transactions_repo
            .find_active_by_booking(req.booking_id)
            .await?
            .is_some()
        {
            return Err(PaymentError::AlreadyPaid);
        }

        let fee_model = req
            .fee_model
            .clone()
            .unwrap_or(FeeModel::Percentage { bps: self.default_fee_bps });
        let fee = platform_fee_minor(req.gross_amount_minor, &fee_model);
        if fee < 0 || fee > req.gross_amount_minor {
            return Err(PaymentError::Validation(
                "platform fee exceeds gross amount".to_string(),
            ));
        }

        // persisted first: a local write failure aborts before any money moves
        let transaction_id = Uuid::new_v4();
        let input = TransactionRecordInput {
            transaction_id,
            booking_id: req.booking_id,
            customer_id: req.customer_id,
            provider_id: req.provider_id,
            account_id: account.account_id.clone(),
            gross_amount_minor: req.gross_amount_minor,
            platform_fee_minor: fee,
            currency: req.currency.clone(),
        };
        if self.transactions_repo.insert_pending(&input).await? == InsertOutcome::Conflict {
            return Err(PaymentError::AlreadyPaid);
        }

        let charge = self
            .processor
            .create_destination_charge(DestinationChargeRequest {
                amount_minor: req.gross_amount_minor,
                currency: req.currency.clone(),
                payment_method_token: req.payment_method_token.clone(),
                destination_account_id: account.account_id.clone(),
                application_fee_minor: fee,
                idempotency_key: transaction_id.to_string(),
            })
            .await;

        let charge_id = match charge {
            Ok(id) => id,
            Err(e) => {
                // the call failed synchronously; nothing to wait for
                self.transactions_repo
                    .mark_failed(transaction_id, &e.to_string())
                    .await?;
                return Err(e);
            }
        };

        // the charge exists remotely from here on; a failed local persist is
        // recovered by the webhook processor's delayed-linking path
        if let Err(e) = self
            .transactions_repo
            .set_processor_charge_id(transaction_id, &charge_id)
            .await
        {
            tracing::warn!(
                transaction_id = %transaction_id,
                charge_id = %charge_id,
                error = %e,
                "charge created but local link failed; webhook will reconcile"
            );
        } else if let Err(e) = self.replay_parked_events(&charge_id).await {
            tracing::warn!(charge_id = %charge_id, error = %e, "parked event replay failed");
        }

        let stored = self
            .transactions_repo
            .get(transaction_id)
            .await?
            .ok_or_else(|| {
                PaymentError::Internal(anyhow::anyhow!("transaction missing after insert"))
            })?;

        Ok(CheckoutResponse {
            transaction_id: stored.transaction_id,
            booking_id: stored.booking_id,
            status: stored.status,
            processor_charge_id: stored.processor_charge_id,
            gross_amount_minor: stored.gross_amount_minor,
            platform_fee_minor: stored.platform_fee_minor,
            currency: stored.currency,
        })
    }

    /// Applies charge events that arrived before the charge id was persisted.
    async fn replay_parked_events(&self, charge_id: &str) -> Result<(), PaymentError> {
        let mut tx = self.pool.begin().await.map_err(PaymentError::from)?;
        let parked = EventsRepo::take_parked_for_charge_tx(&mut tx, charge_id).await?;
        for event in &parked {
            if let Some(status) = status_for_charge_event(&event.event_type) {
                TransactionsRepo::finalize_by_charge_tx(&mut tx, charge_id, status, Utc::now()).await?;
            }
        }
        tx.commit().await.map_err(PaymentError::from)?;

        if !parked.is_empty() {
            tracing::info!(charge_id = %charge_id, count = parked.len(), "replayed parked charge events");
        }
        Ok(())
    }

    fn validate(&self, req: &CheckoutRequest) -> Result<(), PaymentError> {
        if req.gross_amount_minor <= 0 {
            return Err(PaymentError::Validation(
                "gross_amount_minor must be > 0".to_string(),
            ));
        }
        if !req.currency.eq_ignore_ascii_case(&self.settlement_currency) {
            return Err(PaymentError::Validation(format!(
                "only {} settlement is supported",
                self.settlement_currency
            )));
        }
        if req.payment_method_token.is_empty() {
            return Err(PaymentError::Validation(
                "payment_method_token is required".to_string(),
            ));
        }
        if let Some(FeeModel::Percentage { bps }) = &req.fee_model {
            if !(0..=10_000).contains(bps) {
                return Err(PaymentError::Validation(
                    "fee bps must be between 0 and 10000".to_string(),
                ));
            }
        }
        Ok(())
    }
}
