pub mod init;
pub mod input;
pub mod language;
pub mod prompt;
pub mod search;
pub mod title;
