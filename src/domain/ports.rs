use crate::domain::model::{NewUser, User};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Read side of wherever the tabular municipality source lives.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_path(&self) -> &str;
    fn api_endpoint(&self) -> &str;
    fn debounce(&self) -> Duration;
    fn refresh_interval(&self) -> Duration;
}

/// Opaque remote user-record API. Credential verification happens on the
/// remote side against salted hashes; this core never sees stored secrets.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn create_user(&self, new_user: &NewUser) -> Result<User>;
    async fn find_by_cpf(&self, cpf: &str) -> Result<User>;
    async fn verify_credentials(&self, cpf: &str, password: &str) -> Result<User>;
}
