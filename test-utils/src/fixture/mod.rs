//! Page fixtures shaped like the quiz site's markup.
//!
//! These functions only build strings; they do not start any server. They are used by the
//! `TestBuilder` to populate the fake site and directly by parser unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let html = fixture::shot::page_builder().nsfw(true).build().html();
//! let js = fixture::solution::script("Inception", 2010);
//! ```

pub mod account;
pub mod shot;
pub mod solution;
