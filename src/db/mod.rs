//! MongoDB 연결 관리
//!
//! 서버 기동 시 한 번 연결을 만들고 `ping`으로 가용성을 확인한 뒤
//! `ServiceLocator`에 등록합니다. 리포지토리는 `Database::collection`으로
//! 타입이 지정된 컬렉션 핸들을 얻습니다.

use mongodb::{Client, Collection, options::ClientOptions};
use log::info;
use crate::config::DatabaseConfig;

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    pub async fn new() -> Result<Self, mongodb::error::Error> {
        let mongodb_uri = DatabaseConfig::uri();
        let database_name = DatabaseConfig::database_name();

        let mut client_options = ClientOptions::parse(&mongodb_uri).await?;
        client_options.app_name = Some("marketplace_backend".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name,
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.get_database().collection::<T>(name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
