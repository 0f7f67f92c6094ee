#![forbid(unsafe_code)]

pub mod enrichment;
pub mod report_pipeline;
