use sqlx::PgPool;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;
use crate::config::uploads::UploadConfig;
use crate::utils::storage::PhotoStorage;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub upload_config: UploadConfig,
    pub photo_storage: PhotoStorage,
}

pub async fn init_app_state() -> AppState {
    let upload_config = UploadConfig::from_env();
    let photo_storage = PhotoStorage::new(&upload_config);

    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        upload_config,
        photo_storage,
    }
}
