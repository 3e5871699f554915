pub mod commands;
pub mod error;
pub mod jwt;
pub mod password;
pub mod read_model;

pub use commands::{register_user, LoginCommand, RegisterUserCommand};
pub use error::{UserError, UserResult};
pub use jwt::{generate_jwt, validate_jwt, Claims};
pub use password::{hash_password, verify_password};
pub use read_model::{find_user_by_email, find_user_by_id, User};
