//! Redis-backed server-side session state

use redis::Client;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct SessionStore {
    client: Client,
    ttl_seconds: u64,
}

impl SessionStore {
    /// Open the store and check that Redis answers
    pub async fn connect(url: &str, ttl_seconds: u64) -> AppResult<Self> {
        let store = Self::lazy(url, ttl_seconds)?;
        store.ping().await?;
        Ok(store)
    }

    /// Open the store without contacting Redis until first use
    pub fn lazy(url: &str, ttl_seconds: u64) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Session(format!("Failed to create Redis client: {}", e)))?;
        Ok(Self {
            client,
            ttl_seconds,
        })
    }

    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Session(format!("Redis connection test failed: {}", e)))?;
        Ok(())
    }

    /// Count a visit and return how many visits preceded it.
    ///
    /// The increment is atomic, so concurrent requests of one session never
    /// lose a visit. Each visit pushes the session's expiry back.
    pub async fn record_visit(&self, session_id: &Uuid) -> AppResult<i64> {
        let mut conn = self.connection().await?;
        let key = visits_key(session_id);

        let (visits,): (i64,) = redis::pipe()
            .atomic()
            .incr(&key, 1)
            .cmd("EXPIRE")
            .arg(&key)
            .arg(self.ttl_seconds)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::Session(format!("Failed to count visit: {}", e)))?;

        Ok(visits - 1)
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Session(format!("Failed to get Redis connection: {}", e)))
    }
}

fn visits_key(session_id: &Uuid) -> String {
    format!("session:{}:num_visits", session_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_scoped_per_session() {
        let id = Uuid::nil();
        assert_eq!(
            visits_key(&id),
            "session:00000000-0000-0000-0000-000000000000:num_visits"
        );
    }

    #[test]
    fn lazy_store_does_not_connect() {
        assert!(SessionStore::lazy("redis://127.0.0.1:1", 60).is_ok());
        assert!(SessionStore::lazy("not a url", 60).is_err());
    }
}
