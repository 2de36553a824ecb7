mod ledger;

pub use ledger::{
    ReservationDetails, cancel_reservation, create_reservation, get_reservation, list_by_client,
    list_reservations, update_reservation,
};
