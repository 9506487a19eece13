pub mod booking;
pub mod cinema;
pub mod movie;
pub mod showtime;

pub use booking::{Booking, BookingStatus, NewBooking};
pub use cinema::{Cinema, NewCinema};
pub use movie::{Movie, NewMovie};
pub use showtime::{NewShowtime, Showtime};
