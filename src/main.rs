use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use marketplace_payments::config::AppConfig;
use marketplace_payments::repo::accounts_repo::AccountsRepo;
use marketplace_payments::repo::links_repo::LinksRepo;
use marketplace_payments::repo::listings_repo::ListingsRepo;
use marketplace_payments::repo::transactions_repo::TransactionsRepo;
use marketplace_payments::service::checkout_service::CheckoutService;
use marketplace_payments::service::feature_gate::FeatureGate;
use marketplace_payments::service::onboarding_service::OnboardingService;
use marketplace_payments::service::webhook_processor::WebhookProcessor;
use marketplace_payments::AppState;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let accounts_repo = AccountsRepo { pool: pool.clone() };
    let links_repo = LinksRepo { pool: pool.clone() };
    let listings_repo = ListingsRepo { pool: pool.clone() };
    let transactions_repo = TransactionsRepo { pool: pool.clone() };

    let feature_gate = FeatureGate {
        redis_client: redis::Client::open(cfg.redis_url.clone())?,
    };
    let processor = marketplace_payments::processor::build_from_config(&cfg);

    let onboarding_service = OnboardingService {
        accounts_repo: accounts_repo.clone(),
        links_repo,
        listings_repo: listings_repo.clone(),
        processor: processor.clone(),
        return_url: cfg.onboarding_return_url.clone(),
        refresh_url: cfg.onboarding_refresh_url.clone(),
    };

    let checkout_service = CheckoutService {
        pool: pool.clone(),
        accounts_repo: accounts_repo.clone(),
        transactions_repo: transactions_repo.clone(),
        feature_gate: feature_gate.clone(),
        processor,
        settlement_currency: cfg.settlement_currency.clone(),
        default_fee_bps: cfg.platform_fee_bps,
    };

    let webhook_processor = WebhookProcessor { pool: pool.clone() };

    let state = AppState {
        onboarding_service,
        checkout_service,
        webhook_processor,
        accounts_repo,
        transactions_repo,
        listings_repo,
        feature_gate,
        pool,
        webhook_secret: cfg.webhook_secret.clone(),
    };

    let admin_key = cfg.internal_api_key.clone();
    let admin_routes = Router::new()
        .route(
            "/providers/:provider_id/payment-account/refresh",
            post(marketplace_payments::http::handlers::accounts::refresh_account),
        )
        .layer(from_fn_with_state(
            admin_key,
            marketplace_payments::http::middleware::admin_auth::require_internal_api_key,
        ));

    let app = Router::new()
        .route("/health", get(marketplace_payments::http::handlers::ops::health))
        .route(
            "/providers/:provider_id/onboarding",
            post(marketplace_payments::http::handlers::onboarding::start_onboarding),
        )
        .route(
            "/providers/:provider_id/payment-account",
            get(marketplace_payments::http::handlers::accounts::get_payment_account),
        )
        .route(
            "/checkout",
            post(marketplace_payments::http::handlers::checkout::create_checkout),
        )
        .route(
            "/bookings/:booking_id/transaction",
            get(marketplace_payments::http::handlers::checkout::get_booking_transaction),
        )
        .route(
            "/webhooks/processor",
            post(marketplace_payments::http::handlers::webhooks::receive),
        )
        .route(
            "/listings",
            get(marketplace_payments::http::handlers::listings::list_active),
        )
        .route("/ops/readiness", get(marketplace_payments::http::handlers::ops::readiness))
        .route("/ops/liveness", get(marketplace_payments::http::handlers::ops::liveness))
        .merge(admin_routes)
        .layer(from_fn_with_state(
            marketplace_payments::http::middleware::rate_limit::RateLimitState {
                redis_client: redis::Client::open(cfg.redis_url.clone())?,
                max_per_minute: 300,
            },
            marketplace_payments::http::middleware::rate_limit::enforce,
        ))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
