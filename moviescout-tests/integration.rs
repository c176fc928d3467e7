//! Integration tests for MovieScout
//!
//! Exercise the search session end to end: against scripted providers for
//! orchestration behaviour, and against a local OMDb stand-in for the HTTP
//! provider's wire handling.

#[path = "integration/omdb_http.rs"]
mod omdb_http;
#[path = "integration/session_flow.rs"]
mod session_flow;
