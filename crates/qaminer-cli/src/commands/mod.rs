pub mod extract;
pub mod lines;
pub mod variants;
