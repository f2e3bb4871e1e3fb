mod clone;

pub use clone::clone;
