pub mod error;
pub mod export;
pub mod mapping;
pub mod parse;
pub mod report;
pub mod types;
mod utils;

pub use error::ProbeError;
pub use mapping::suggest_name_map;
pub use parse::{load_skeleton_from_file, load_skeleton_from_string};
pub use utils::guess_unit_scale;
