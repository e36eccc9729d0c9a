pub mod init;
pub mod levels;
pub mod play;
pub mod preview;
pub mod validate;
