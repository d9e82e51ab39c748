pub mod aggregate;
pub mod dataset;
pub mod extract;
pub mod pipeline;
pub mod serialization;
pub mod synthesis;

mod traits;

pub use traits::{BroadeningKernel, LogExtractor};
