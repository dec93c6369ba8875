//! Interaction logic shared by the rendered frontend and the host-side tests.
//!
//! Everything in here is plain state and arithmetic with no DOM types, so the
//! carousel, parallax, pointer, and contact-form behavior can be exercised
//! with `cargo test` on any target.

pub mod carousel;
pub mod contact;
pub mod parallax;
pub mod pointer;
