#![forbid(unsafe_code)]

//! Reflow public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users.

pub mod prelude {
    pub use reflow_core as core;
    pub use reflow_widgets as widgets;

    pub use reflow_core::{Action, StateContainer, StateError, Subscription};
    pub use reflow_widgets::{Emitter, StatefulDatepicker, StatefulTextarea, View};
}
