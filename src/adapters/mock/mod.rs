pub mod account_directory;

pub use account_directory::AccountDirectory;
