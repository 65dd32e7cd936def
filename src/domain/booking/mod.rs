pub mod model;
pub mod repository;

pub use model::{Booking, BookingStatus, ClientInfo, PaymentStatus};
pub use repository::BookingRepository;
