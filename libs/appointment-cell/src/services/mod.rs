pub mod booking;
pub mod lifecycle;
pub mod views;

pub use booking::BookingService;
pub use lifecycle::{LifecycleService, TransitionPolicy};
pub use views::AppointmentQueryService;
