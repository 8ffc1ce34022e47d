use redis::AsyncCommands;

/// Read-through flag gate, consulted per request. Any read error or missing
/// key reads as disabled.
#[derive(Clone)]
pub struct FeatureGate {
    pub redis_client: redis::Client,
}

impl FeatureGate {
    pub async fn is_enabled(&self, key: &str) -> bool {
        let Ok(mut conn) = self.redis_client.get_multiplexed_async_connection().await else {
            return false;
        };

        let value: redis::RedisResult<Option<String>> = conn.get(format!("feature:{key}")).await;
        match value {
            Ok(Some(raw)) => flag_on(&raw),
            _ => false,
        }
    }
}

pub fn flag_on(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "enabled"
    )
}
