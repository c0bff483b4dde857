//! In-memory editing sessions. Nothing here outlives the process.

pub mod in_flight;
pub mod notifications;
pub mod store;

pub use in_flight::BusyKey;
pub use notifications::NotificationQueue;
pub use store::{Session, SessionStore};
