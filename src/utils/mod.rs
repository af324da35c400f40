pub mod error;
pub mod output;
pub mod pagination;
pub mod terminal;

pub use error::*;
pub use output::*;
pub use pagination::*;
pub use terminal::*;
