//! Shared logic for the portfolio site.
//!
//! The binary wires this into a Yew frontend on wasm32 and an axum contact
//! relay everywhere else; the library itself stays DOM-free.

pub mod interaction;
