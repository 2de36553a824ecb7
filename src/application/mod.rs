pub mod client_directory;
pub mod dependencies;
pub mod errors;
pub mod inventory;
pub mod reservation;

pub use dependencies::ServiceDependencies;
pub use errors::{ErrorKind, ReservationError, Result};
