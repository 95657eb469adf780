mod codec;
mod constants;
mod layout;
mod limits;
mod spin;
mod state;
mod wager;

pub use constants::*;
pub use layout::*;
pub use limits::*;
pub use spin::*;
pub use state::*;
pub use wager::*;
