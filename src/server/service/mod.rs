//! Clients for the external services quiz content comes from.
//!
//! `wtm` scrapes stills and solutions from whatthemovie.com; `tmdb` optionally adds
//! alternative titles from The Movie Database.

pub mod tmdb;
pub mod wtm;
