pub mod product;
pub mod token;
