pub mod booking;
pub mod geometry;
pub mod layout;
pub mod plot;
pub mod repositories;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingStatus, ClientInfo, PaymentStatus};
pub use layout::{Layout, LayoutWithStats};
pub use plot::{Plot, PlotStatus, PlotStatusCounts};
pub use repositories::RepositoryProvider;
pub use user::{User, UserRole};

// Re-export error types from shared for convenience
pub use crate::shared::{DomainError, DomainResult};
