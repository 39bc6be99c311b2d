// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Route Prefix: /api/*
// Middleware: jwt_auth_middleware, which injects AuthUser into request extensions

pub mod products; // Product CRUD
pub mod user;     // The authenticated identity

pub use user::user_get;
