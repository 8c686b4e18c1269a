pub mod seat;
pub mod venue;

pub use seat::{Seat, SeatStatus, SelectedSeat};
pub use venue::{Row, Section, Transform, Venue, VenueError, VenueMap};
