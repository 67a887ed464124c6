pub mod error;
pub mod password;
pub mod session;
pub mod token;

pub use error::AuthError;
pub use session::{Principal, SessionResolver};
pub use token::TokenService;
