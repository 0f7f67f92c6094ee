pub mod aggregate;
pub mod entity;
