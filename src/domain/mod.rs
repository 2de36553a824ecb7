pub mod client;
pub mod commands;
pub mod costume;
pub mod errors;
pub mod pricing;
pub mod reservation;
pub mod value_objects;

pub use client::*;
pub use costume::*;
pub use errors::*;
pub use reservation::*;
pub use value_objects::*;
