pub mod bbox;
pub mod grid;
pub mod margins;
