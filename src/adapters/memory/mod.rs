pub mod booking_store;

pub use booking_store::BookingStore;
pub use booking_store::BookingStore as InMemoryBookingStore;
