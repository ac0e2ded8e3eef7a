pub mod alert;
pub mod encounter;
pub mod enums;
pub mod exam;
pub mod lab;

pub use alert::*;
pub use encounter::*;
pub use exam::*;
pub use lab::*;
