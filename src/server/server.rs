use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::infra_redis::*;
use crate::logger::*;
use crate::settings::Settings;
use anyhow::anyhow;
use sqlx::MySqlPool;
use std::sync::Arc;
use std::time::Duration;

pub struct Server {
    pub auth_service: Arc<dyn AuthService>,
    pub post_service: Arc<dyn PostService>,
    pub user_service: Arc<dyn UserService>,
    pool: Option<MySqlPool>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let token_codec: Arc<dyn TokenCodec> = Arc::new(JwtHs256Codec::new(JwtConfig {
            issuer: settings.auth.issuer.clone(),
            audience: settings.auth.audience.clone(),
            access_ttl: Duration::from_secs(settings.auth.access_ttl_secs),
            refresh_ttl: Duration::from_secs(settings.auth.refresh_ttl_secs),
            access_secret: settings.auth.access_secret.clone().into_bytes(),
            refresh_secret: settings.auth.refresh_secret.clone().into_bytes(),
        }));

        let session_store: Arc<dyn SessionStore> = match settings.session.backend.as_str() {
            "memory" => Arc::new(MemorySessionStore::new()),
            "redis" => {
                let url = settings
                    .session
                    .redis_url
                    .as_deref()
                    .ok_or_else(|| anyhow!("session.redis_url is required for redis backend"))?;
                let redis_client = redis::Client::open(url)?;
                let redis_manager = redis_client.get_connection_manager().await?;
                Arc::new(RedisSessionStore::new(
                    redis_manager,
                    settings.session.prefix.clone(),
                ))
            }
            other => return Err(anyhow!("Unknown session backend: {}", other)),
        };

        let user_repo: Arc<dyn UserRepo>;
        let post_repo: Arc<dyn PostRepo>;
        let mut pool = None;
        match settings.storage.backend.as_str() {
            "memory" => {
                user_repo = Arc::new(MemoryUserRepo::new());
                post_repo = Arc::new(MemoryPostRepo::new());
            }
            "mysql" => {
                let url = settings
                    .storage
                    .mysql_url
                    .as_deref()
                    .ok_or_else(|| anyhow!("storage.mysql_url is required for mysql backend"))?;
                let mysql = MySqlPool::connect(url).await?;
                user_repo = Arc::new(MySqlUserRepo::new(mysql.clone()));
                post_repo = Arc::new(MySqlPostRepo::new(mysql.clone()));
                pool = Some(mysql);
            }
            other => return Err(anyhow!("Unknown storage backend: {}", other)),
        }

        info!(
            session = %settings.session.backend,
            storage = %settings.storage.backend,
            "server started"
        );

        Ok(Self::from_parts(
            token_codec,
            session_store,
            user_repo,
            post_repo,
            pool,
        ))
    }

    /// Everything in process memory; nothing survives a restart.
    pub fn in_memory(jwt: JwtConfig) -> Self {
        Self::from_parts(
            Arc::new(JwtHs256Codec::new(jwt)),
            Arc::new(MemorySessionStore::new()),
            Arc::new(MemoryUserRepo::new()),
            Arc::new(MemoryPostRepo::new()),
            None,
        )
    }

    fn from_parts(
        token_codec: Arc<dyn TokenCodec>,
        session_store: Arc<dyn SessionStore>,
        user_repo: Arc<dyn UserRepo>,
        post_repo: Arc<dyn PostRepo>,
        pool: Option<MySqlPool>,
    ) -> Self {
        Self {
            auth_service: Arc::new(RealAuthService::new(token_codec, session_store)),
            post_service: Arc::new(RealPostService::new(post_repo)),
            user_service: Arc::new(RealUserService::new(user_repo)),
            pool,
        }
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
