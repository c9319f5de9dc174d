mod command_result;
pub mod generate;
pub mod helper;
pub mod init;
pub mod load;
pub mod snapshot;

pub use command_result::*;
