pub mod funders;

pub use funders::*;
