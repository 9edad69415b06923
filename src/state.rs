use crate::config::AppConfig;
use crate::db;
use crate::jokes::repo::{JokeRepo, PgJokeRepo};
use crate::users::repo::{PgUserRepo, UserRepo};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub jokes: Arc<dyn JokeRepo>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let pool = db::connect(&config.database_url).await?;
        db::migrate(&pool).await?;

        let users = Arc::new(PgUserRepo::new(pool.clone())) as Arc<dyn UserRepo>;
        let jokes = Arc::new(PgJokeRepo::new(pool)) as Arc<dyn JokeRepo>;

        Ok(Self::from_parts(config, users, jokes))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserRepo>,
        jokes: Arc<dyn JokeRepo>,
    ) -> Self {
        Self {
            config,
            users,
            jokes,
        }
    }
}
