// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (JWT bearer token, /api/*)
pub mod public;    // Banner and health probe
pub mod protected; // Product CRUD and the authenticated identity
