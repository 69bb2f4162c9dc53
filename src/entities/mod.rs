pub mod funder;

pub use funder::*;
