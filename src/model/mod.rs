pub mod accumulator;
pub mod document;
pub mod exchange;
pub mod observation;
pub mod schema;
pub mod value;

pub use accumulator::*;
pub use document::*;
pub use exchange::*;
pub use observation::*;
pub use schema::*;
pub use value::*;
