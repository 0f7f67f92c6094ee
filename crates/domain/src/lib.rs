#![forbid(unsafe_code)]

pub mod assessment;
pub mod common;
pub mod enrichment;
pub mod recommendation;
