pub mod traits;
pub mod yaml;

pub use traits::*;
pub use yaml::*;
