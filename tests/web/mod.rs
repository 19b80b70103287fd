//! Router tests against mock database clients.
//!
//! These run without any external services.
