pub mod collection;
pub mod payload;
pub mod record;

// Re-export handler functions for use in routing
pub use collection::create as products_post;
pub use collection::list as products_get;

pub use record::delete as product_delete;
pub use record::show as product_get;
pub use record::update as product_put;
