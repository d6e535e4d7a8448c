//! Load a delimited text file into a dense numeric table: one header line of
//! column labels, then rows of floating-point cells.

pub mod config;
pub mod error;
pub mod frame;
pub mod load;

pub use config::{LoadConfig, Strictness};
pub use error::{LoadError, Result};
pub use frame::{FrameBuilder, Table};
pub use load::{load_csv, load_csv_single_pass, load_from_reader, Dimensions};
