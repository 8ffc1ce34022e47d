use crate::domain::account::OnboardingLink;
use anyhow::Result;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct LinksRepo {
    pub pool: PgPool,
}

impl LinksRepo {
    pub async fn current_for_account(&self, account_id: &str) -> Result<Option<OnboardingLink>> {
        let row = sqlx::query(
            "SELECT account_id, url, expires_at FROM onboarding_links WHERE account_id = $1",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| OnboardingLink {
            account_id: r.get("account_id"),
            url: r.get("url"),
            expires_at: r.get("expires_at"),
        }))
    }

    pub async fn upsert(&self, link: &OnboardingLink) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO onboarding_links (account_id, url, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (account_id)
            DO UPDATE SET url = EXCLUDED.url, expires_at = EXCLUDED.expires_at, created_at = now()
            "#,
        )
        .bind(&link.account_id)
        .bind(&link.url)
        .bind(link.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
