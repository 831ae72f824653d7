//! Output rendering: terminal formatting and diagnostic plots.

pub mod plot;
pub mod terminal;
