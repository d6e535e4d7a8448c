pub mod builder;
pub mod table;
pub mod write;

pub use builder::FrameBuilder;
pub use table::Table;
