//! Data models for the trivia question service.

mod question;

pub use question::*;
