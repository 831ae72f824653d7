//! Statistical core: rank transformation, Tukey all-pairs contrasts, and the
//! joint reference distribution shared by the omnibus test and the
//! single-step adjustment.

pub mod contrast;
pub mod friedman;
pub mod rank;
pub mod tukey;

pub use friedman::{adjusted_p_values, omnibus_test};
