pub mod line;

pub use line::{Line, Line2, Line3};
