pub mod decision;
pub mod directory;
