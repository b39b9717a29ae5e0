pub mod conference;

pub use conference::*;
