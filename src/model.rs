pub mod entry;
pub mod object;
