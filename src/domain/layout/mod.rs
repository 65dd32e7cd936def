pub mod model;
pub mod repository;

pub use model::{Layout, LayoutWithStats};
pub use repository::LayoutRepository;
