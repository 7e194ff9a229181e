//! Registration, login and password-recovery orchestration: local field
//! validation first, then one opaque call to the remote user-record API.

use crate::core::cpf;
use crate::domain::model::{NewUser, User};
use crate::domain::ports::UserDirectory;
use crate::utils::error::{Result, SaudeError};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub name: String,
    pub cpf: String,
    pub password: String,
    pub confirm_password: String,
}

pub struct AccountFlow<D: UserDirectory> {
    directory: D,
}

impl<D: UserDirectory> AccountFlow<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Validates the submitted form and creates the user record. The CPF is
    /// stripped to its 11 digits before going over the wire; a duplicate CPF
    /// surfaces as `ConflictError`.
    pub async fn register(&self, request: &RegistrationRequest) -> Result<User> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(validation("Name is required"));
        }

        if !cpf::validate(&request.cpf) {
            return Err(validation("CPF is invalid. Check the submitted digits."));
        }

        if request.password != request.confirm_password {
            return Err(validation("Passwords do not match"));
        }

        check_password_len(&request.password)?;

        let new_user = NewUser {
            name: name.to_string(),
            cpf: cpf::strip(&request.cpf),
            password: request.password.clone(),
        };

        tracing::debug!("Registering user for CPF {}", cpf::format(&new_user.cpf));
        self.directory.create_user(&new_user).await
    }

    /// Validates the credentials form, then delegates the actual check to
    /// the remote side (salted-hash comparison happens there).
    pub async fn login(&self, cpf_raw: &str, password: &str) -> Result<User> {
        if !cpf::validate(cpf_raw) {
            return Err(validation("CPF is invalid. Check the submitted digits."));
        }

        check_password_len(password)?;

        let user = self
            .directory
            .verify_credentials(&cpf::strip(cpf_raw), password)
            .await?;

        tracing::debug!("Login succeeded for CPF {}", cpf::format(&user.cpf));
        Ok(user)
    }

    /// Password-recovery entry point: confirms the CPF belongs to a
    /// registered account before any reset instructions go out.
    pub async fn recover(&self, cpf_raw: &str) -> Result<User> {
        if !cpf::validate(cpf_raw) {
            return Err(validation("CPF is invalid. Check the submitted digits."));
        }

        self.directory.find_by_cpf(&cpf::strip(cpf_raw)).await
    }
}

fn check_password_len(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(validation("Password must have at least 6 characters"));
    }
    Ok(())
}

fn validation(message: &str) -> SaudeError {
    SaudeError::ValidationError {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockDirectory {
        users: Arc<Mutex<HashMap<String, (User, String)>>>,
        next_id: Arc<Mutex<u32>>,
    }

    impl MockDirectory {
        fn new() -> Self {
            Self {
                users: Arc::new(Mutex::new(HashMap::new())),
                next_id: Arc::new(Mutex::new(1)),
            }
        }

        async fn stored_cpfs(&self) -> Vec<String> {
            let users = self.users.lock().await;
            users.keys().cloned().collect()
        }
    }

    #[async_trait]
    impl UserDirectory for MockDirectory {
        async fn create_user(&self, new_user: &NewUser) -> Result<User> {
            let mut users = self.users.lock().await;
            if users.contains_key(&new_user.cpf) {
                return Err(SaudeError::ConflictError {
                    cpf: new_user.cpf.clone(),
                });
            }

            let mut next_id = self.next_id.lock().await;
            let user = User {
                id: next_id.to_string(),
                name: new_user.name.clone(),
                cpf: new_user.cpf.clone(),
            };
            *next_id += 1;

            users.insert(new_user.cpf.clone(), (user.clone(), new_user.password.clone()));
            Ok(user)
        }

        async fn find_by_cpf(&self, cpf: &str) -> Result<User> {
            let users = self.users.lock().await;
            users
                .get(cpf)
                .map(|(user, _)| user.clone())
                .ok_or_else(|| SaudeError::NotFoundError {
                    cpf: cpf.to_string(),
                })
        }

        async fn verify_credentials(&self, cpf: &str, password: &str) -> Result<User> {
            let users = self.users.lock().await;
            let (user, stored) = users.get(cpf).ok_or_else(|| SaudeError::NotFoundError {
                cpf: cpf.to_string(),
            })?;

            if stored != password {
                return Err(SaudeError::CredentialError {
                    cpf: cpf.to_string(),
                });
            }
            Ok(user.clone())
        }
    }

    fn valid_request() -> RegistrationRequest {
        RegistrationRequest {
            name: "Maria Silva".to_string(),
            cpf: "123.456.789-09".to_string(),
            password: "segredo1".to_string(),
            confirm_password: "segredo1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_strips_cpf_before_wire_call() {
        let directory = MockDirectory::new();
        let flow = AccountFlow::new(directory.clone());

        let user = flow.register(&valid_request()).await.unwrap();
        assert_eq!(user.cpf, "12345678909");
        assert_eq!(directory.stored_cpfs().await, vec!["12345678909"]);
    }

    #[tokio::test]
    async fn test_register_rejects_blank_name() {
        let flow = AccountFlow::new(MockDirectory::new());
        let mut request = valid_request();
        request.name = "   ".to_string();

        let err = flow.register(&request).await.unwrap_err();
        assert!(matches!(err, SaudeError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_cpf() {
        let flow = AccountFlow::new(MockDirectory::new());
        let mut request = valid_request();
        request.cpf = "123.456.789-08".to_string();

        let err = flow.register(&request).await.unwrap_err();
        assert!(matches!(err, SaudeError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_register_rejects_password_mismatch() {
        let flow = AccountFlow::new(MockDirectory::new());
        let mut request = valid_request();
        request.confirm_password = "segredo2".to_string();

        let err = flow.register(&request).await.unwrap_err();
        assert!(matches!(err, SaudeError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let flow = AccountFlow::new(MockDirectory::new());
        let mut request = valid_request();
        request.password = "abc".to_string();
        request.confirm_password = "abc".to_string();

        let err = flow.register(&request).await.unwrap_err();
        assert!(matches!(err, SaudeError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_register_duplicate_cpf_conflicts() {
        let flow = AccountFlow::new(MockDirectory::new());

        flow.register(&valid_request()).await.unwrap();
        let err = flow.register(&valid_request()).await.unwrap_err();
        assert!(matches!(err, SaudeError::ConflictError { .. }));
    }

    #[tokio::test]
    async fn test_login_happy_path_accepts_formatted_cpf() {
        let flow = AccountFlow::new(MockDirectory::new());
        flow.register(&valid_request()).await.unwrap();

        let user = flow.login("123.456.789-09", "segredo1").await.unwrap();
        assert_eq!(user.name, "Maria Silva");
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_credential_error() {
        let flow = AccountFlow::new(MockDirectory::new());
        flow.register(&valid_request()).await.unwrap();

        let err = flow.login("12345678909", "errada1").await.unwrap_err();
        assert!(matches!(err, SaudeError::CredentialError { .. }));
    }

    #[tokio::test]
    async fn test_login_unknown_cpf_is_not_found() {
        let flow = AccountFlow::new(MockDirectory::new());

        let err = flow.login("98765432100", "segredo1").await.unwrap_err();
        assert!(matches!(err, SaudeError::NotFoundError { .. }));
    }

    #[tokio::test]
    async fn test_login_invalid_cpf_fails_before_remote_call() {
        let directory = MockDirectory::new();
        let flow = AccountFlow::new(directory.clone());

        let err = flow.login("11111111111", "segredo1").await.unwrap_err();
        assert!(matches!(err, SaudeError::ValidationError { .. }));
        assert!(directory.stored_cpfs().await.is_empty());
    }

    #[tokio::test]
    async fn test_recover_confirms_registered_cpf() {
        let flow = AccountFlow::new(MockDirectory::new());
        flow.register(&valid_request()).await.unwrap();

        let user = flow.recover("123.456.789-09").await.unwrap();
        assert_eq!(user.cpf, "12345678909");
    }

    #[tokio::test]
    async fn test_recover_unknown_cpf_is_not_found() {
        let flow = AccountFlow::new(MockDirectory::new());

        let err = flow.recover("98765432100").await.unwrap_err();
        assert!(matches!(err, SaudeError::NotFoundError { .. }));
    }
}
