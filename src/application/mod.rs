//! Application services and outbound ports

pub mod ports;
pub mod services;

pub use services::{BookingService, LayoutService, PlotService};
