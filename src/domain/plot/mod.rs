pub mod model;
pub mod repository;

pub use model::{Plot, PlotStatus, PlotStatusCounts};
pub use repository::{PlotRepository, PlotSearch};
