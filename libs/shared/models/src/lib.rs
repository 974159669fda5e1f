pub mod appointment;
pub mod doctor;
pub mod error;
pub mod patient;

pub use appointment::{
    slot_end, windows_overlap, Appointment, AppointmentStatus, NewAppointment, SLOT_MINUTES,
};
pub use doctor::{Doctor, NewDoctor};
pub use error::AppError;
pub use patient::{NewPatient, Patient};
