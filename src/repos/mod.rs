pub mod error;
#[cfg(test)]
pub mod memory;
pub mod trip_repo;
pub mod user_repo;

pub use error::RepoError;
pub use trip_repo::{PgTripRepo, TripStore};
pub use user_repo::{PgUserRepo, UserStore};
