use crate::domain::account::{ConnectedAccount, OnboardingLink};
use crate::domain::error::PaymentError;
use crate::processor::ProcessorClient;
use crate::repo::accounts_repo::AccountsRepo;
use crate::repo::links_repo::LinksRepo;
use crate::repo::listings_repo::ListingsRepo;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct OnboardingService {
    pub accounts_repo: AccountsRepo,
    pub links_repo: LinksRepo,
    pub listings_repo: ListingsRepo,
    pub processor: Arc<dyn ProcessorClient>,
    pub return_url: String,
    pub refresh_url: String,
}

impl OnboardingService {
    /// Idempotent re-entry: an unexpired stored link is returned unchanged.
    /// Account creation commits before link issuance, so a failed link
    /// request resumes from link issuance on retry instead of re-creating
    /// the processor account.
    pub async fn start_onboarding(&self, provider_id: Uuid) -> Result<OnboardingLink, PaymentError> {
        let account = match self.accounts_repo.get_by_provider(provider_id).await? {
            Some(account) => account,
            None => self.create_account(provider_id).await?,
        };

        if let Some(link) = self.links_repo.current_for_account(&account.account_id).await? {
            if !link.is_expired(Utc::now()) {
                return Ok(link);
            }
        }

        let link = self
            .processor
            .create_onboarding_link(&account.account_id, &self.return_url, &self.refresh_url)
            .await?;
        self.links_repo.upsert(&link).await?;
        self.accounts_repo.mark_link_issued(&account.account_id).await?;

        tracing::info!(
            provider_id = %provider_id,
            account_id = %account.account_id,
            "onboarding link issued"
        );

        Ok(link)
    }

    /// Explicit reconciliation poll against the processor's state of record.
    pub async fn refresh_account(&self, provider_id: Uuid) -> Result<ConnectedAccount, PaymentError> {
        let account = self
            .accounts_repo
            .get_by_provider(provider_id)
            .await?
            .ok_or(PaymentError::AccountNotFound)?;

        let update = self.processor.retrieve_account(&account.account_id).await?;
        self.accounts_repo
            .apply_capabilities(&account.account_id, &update, Utc::now())
            .await?;

        self.accounts_repo
            .get_by_provider(provider_id)
            .await?
            .ok_or(PaymentError::AccountNotFound)
    }

    async fn create_account(&self, provider_id: Uuid) -> Result<ConnectedAccount, PaymentError> {
        let profile = self
            .listings_repo
            .get_provider_profile(provider_id)
            .await?
            .ok_or_else(|| PaymentError::Validation("unknown provider".to_string()))?;

        let account_id = self.processor.create_account(&profile).await?;
        self.accounts_repo.insert(&account_id, provider_id).await?;

        // re-read: a concurrent start may have won the insert
        self.accounts_repo
            .get_by_provider(provider_id)
            .await?
            .ok_or_else(|| {
                PaymentError::Internal(anyhow::anyhow!("connected account missing after insert"))
            })
    }
}
