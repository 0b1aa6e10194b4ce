mod progress_bar;
mod spin;
mod styled;
mod terminal;

pub use progress_bar::*;
pub use spin::*;
pub use styled::*;
pub use terminal::*;
