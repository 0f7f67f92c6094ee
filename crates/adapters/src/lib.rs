#![deny(unsafe_code)]

pub mod completion;
pub mod export;
pub mod http;
