pub mod format;
pub mod logger;
pub mod memo;
pub mod process;

pub use format::*;
pub use logger::*;
pub use memo::*;
pub use process::*;
