pub mod lenient;
pub mod logs;

pub use logs::*;
