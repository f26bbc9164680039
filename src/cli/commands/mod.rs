mod command_result;
pub mod helper;
pub mod init;
pub mod references;
pub mod strings;

pub use command_result::*;
