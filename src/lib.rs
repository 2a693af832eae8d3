pub mod components;

pub mod lessons;

pub mod stories;

pub mod theme;

mod utils;
pub use utils::ElementIdExt;

mod init;
pub use init::*;
