use sqlx::PgPool;

use tuitionhub_config::{CorsConfig, JwtConfig, PerformanceConfig, ServerConfig};
use tuitionhub_db::init_db_pool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
    pub performance_config: PerformanceConfig,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        server_config: ServerConfig::from_env(),
        performance_config: PerformanceConfig::from_env(),
    }
}
