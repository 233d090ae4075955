pub mod body;
pub mod package;
pub mod xml;
