pub mod cpf;
pub mod dashboard;
pub mod debounce;
pub mod directory;
pub mod flow;
pub mod search;
pub mod store;

pub use crate::domain::model::{Municipality, NewUser, User};
pub use crate::domain::ports::{ConfigProvider, Storage, UserDirectory};
pub use crate::utils::error::Result;
