//! Terminal front end

pub mod check;
pub mod console;
pub mod play;
pub mod view_state;
