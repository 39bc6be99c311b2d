pub mod response;

pub use response::{ProductResponse, ProductResult};
