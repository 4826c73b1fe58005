//! # Ledger server
//! This crate hosts the HTTP front end for the coin ledger. It is responsible for:
//! * Exchanging usernames and passwords for access tokens, creating accounts on first login.
//! * Checking access tokens on every other call.
//! * Translating requests into ledger operations, and ledger errors into HTTP status codes.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `GET /health`: A health check route that returns a 200 OK response.
//! * `POST /api/auth`: `{"username", "password"}` in, `{"token"}` out.
//! * `GET /api/info`: The caller's coins, inventory and coin history.
//! * `POST /api/sendCoin`: `{"toUser", "amount"}`. Sends coins to another user.
//! * `GET /api/buy/{item}`: Buys one of `item` from the catalog.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;

pub mod helpers;
pub mod routes;
pub mod server;
