//! Notification plumbing between the session and presentation layers.
mod bus;

pub use bus::EventBus;
