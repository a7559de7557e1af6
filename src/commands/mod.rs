pub mod inspect;
pub mod segment;
