pub mod items;
pub mod root;
