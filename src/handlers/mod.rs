// handlers/mod.rs - HTTP handlers grouped by resource
//
// Every Dashboard handler resolves the active credential first, so a missing
// key fails with 400 before any remote call is made.
pub mod credentials; // POST /set_api_key
pub mod networks; // /networks/*
pub mod organizations; // GET /organizations
pub mod system; // GET /, GET /health, fallback
