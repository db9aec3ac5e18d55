pub mod ballot;
pub use ballot::*;

pub mod events;
pub use events::*;
