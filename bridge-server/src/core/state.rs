//! Server state
//!
//! A cheap-to-clone handle bundling the connection pool, the remote client
//! and the two sync services. Handlers receive it through axum's `State`;
//! tests build it with [`ServerState::with_parts`] and a scripted remote.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::core::Config;
use crate::db::DbService;
use crate::mailchimp::{MailChimpApi, MailChimpClient};
use crate::services::{ListSyncService, MemberSyncService};
use shared::AppResult;

#[derive(Clone)]
pub struct ServerState {
    pub pool: SqlitePool,
    pub remote: Arc<dyn MailChimpApi>,
    pub lists: Arc<ListSyncService>,
    pub members: Arc<MemberSyncService>,
}

impl ServerState {
    /// Initialize production state: open the database, build the MailChimp
    /// client, wire the services
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path).await?;
        let client = match &config.mailchimp_base_url {
            Some(base_url) => MailChimpClient::with_base_url(
                &config.mailchimp_api_key,
                base_url,
                config.request_timeout_ms,
            )?,
            None => MailChimpClient::new(&config.mailchimp_api_key, config.request_timeout_ms)?,
        };
        let remote: Arc<dyn MailChimpApi> = Arc::new(client);
        Ok(Self::with_parts(db.pool, remote))
    }

    /// Build state from an existing pool and remote client
    pub fn with_parts(pool: SqlitePool, remote: Arc<dyn MailChimpApi>) -> Self {
        let lists = Arc::new(ListSyncService::new(pool.clone(), remote.clone()));
        let members = Arc::new(MemberSyncService::new(pool.clone(), remote.clone()));
        Self {
            pool,
            remote,
            lists,
            members,
        }
    }
}
