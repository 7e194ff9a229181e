//! HTTP adapter for the opaque user-record API: create on `POST /usuarios`,
//! bare lookup on `GET /usuarios/{cpf}`, credential check on `POST /login`.

use crate::domain::model::{NewUser, User};
use crate::domain::ports::UserDirectory;
use crate::utils::error::{Result, SaudeError};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

pub struct HttpUserDirectory {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    #[allow(dead_code)]
    message: Option<String>,
    user: User,
}

#[derive(Debug, Serialize)]
struct LoginPayload<'a> {
    cpf: &'a str,
    password: &'a str,
}

impl HttpUserDirectory {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn create_user(&self, new_user: &NewUser) -> Result<User> {
        tracing::debug!("POST {} for new user", self.url("/usuarios"));
        let response = self
            .client
            .post(self.url("/usuarios"))
            .json(new_user)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                let envelope: UserEnvelope = response.json().await?;
                Ok(envelope.user)
            }
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT => Err(SaudeError::ConflictError {
                cpf: new_user.cpf.clone(),
            }),
            _ => Err(unexpected_status(response)),
        }
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<User> {
        let url = self.url(&format!("/usuarios/{}", cpf));
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.json::<User>().await?),
            StatusCode::NOT_FOUND => Err(SaudeError::NotFoundError {
                cpf: cpf.to_string(),
            }),
            _ => Err(unexpected_status(response)),
        }
    }

    async fn verify_credentials(&self, cpf: &str, password: &str) -> Result<User> {
        tracing::debug!("POST {}", self.url("/login"));
        let response = self
            .client
            .post(self.url("/login"))
            .json(&LoginPayload { cpf, password })
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let envelope: UserEnvelope = response.json().await?;
                Ok(envelope.user)
            }
            StatusCode::NOT_FOUND => Err(SaudeError::NotFoundError {
                cpf: cpf.to_string(),
            }),
            StatusCode::UNAUTHORIZED => Err(SaudeError::CredentialError {
                cpf: cpf.to_string(),
            }),
            _ => Err(unexpected_status(response)),
        }
    }
}

fn unexpected_status(response: Response) -> SaudeError {
    match response.error_for_status() {
        Err(e) => e.into(),
        Ok(response) => SaudeError::UnexpectedResponseError {
            message: format!("status {}", response.status()),
        },
    }
}
