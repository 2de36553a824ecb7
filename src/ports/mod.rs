pub mod account_directory;
pub mod booking_store;
pub mod client_directory;
pub mod inventory_store;
pub mod reservation_store;

pub use account_directory::AccountDirectory;
pub use booking_store::{BookingStore, BookingTransaction};
pub use client_directory::ClientDirectory;
pub use inventory_store::InventoryStore;
pub use reservation_store::ReservationStore;

/// ポート共通のエラー型
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;
