//! Wizard Controller: a fixed sequence of steps editing one shared document.
//!
//! Each step edits a draft (working copy). A draft reaches the committed
//! document only through `submit`, after the step's validation policy
//! accepts it. Leaving a step any other way discards the draft.

pub mod controller;
pub mod draft;
pub mod handlers;
pub mod progress;
pub mod steps;
pub mod validation;

pub use controller::{WizardError, WizardSession, WizardState};
pub use draft::Draft;
pub use steps::Step;
