pub mod conferences;
pub mod web;

pub use conferences::*;
