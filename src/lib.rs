pub mod account {
    pub mod eligibility;
    pub mod transitions;
}
pub mod config;
pub mod domain {
    pub mod account;
    pub mod error;
    pub mod event;
    pub mod fee;
    pub mod listing;
    pub mod transaction;
}
pub mod http {
    pub mod handlers {
        pub mod accounts;
        pub mod checkout;
        pub mod listings;
        pub mod onboarding;
        pub mod ops;
        pub mod webhooks;
    }
    pub mod middleware {
        pub mod admin_auth;
        pub mod rate_limit;
    }
}
pub mod processor;
pub mod repo {
    pub mod accounts_repo;
    pub mod events_repo;
    pub mod links_repo;
    pub mod listings_repo;
    pub mod transactions_repo;
}
pub mod service {
    pub mod checkout_service;
    pub mod feature_gate;
    pub mod onboarding_service;
    pub mod webhook_processor;
}
pub mod webhook {
    pub mod signature;
}

#[derive(Clone)]
pub struct AppState {
    pub onboarding_service: service::onboarding_service::OnboardingService,
    pub checkout_service: service::checkout_service::CheckoutService,
    pub webhook_processor: service::webhook_processor::WebhookProcessor,
    pub accounts_repo: repo::accounts_repo::AccountsRepo,
    pub transactions_repo: repo::transactions_repo::TransactionsRepo,
    pub listings_repo: repo::listings_repo::ListingsRepo,
    pub feature_gate: service::feature_gate::FeatureGate,
    pub pool: sqlx::PgPool,
    pub webhook_secret: String,
}
