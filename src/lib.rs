pub mod composer;
pub mod config;
pub mod segments;
pub mod serve;
pub mod session;
pub mod shell;
pub mod themes;
pub mod tracker;
pub mod utils;

pub use composer::*;
pub use config::*;
pub use segments::*;
pub use session::*;
pub use themes::*;
pub use tracker::*;
pub use utils::*;
