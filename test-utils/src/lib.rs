//! WTM Bot Test Utils
//!
//! Provides shared testing utilities for the quiz bot. The main piece is a fake
//! whatthemovie.com site served by a local `mockito` server, so the content fetcher can be
//! exercised end to end without touching the network.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for configuring which site routes exist
//! - **TestContext**: Running fake site with handles to every mounted route
//! - **fixture**: HTML and JavaScript pages shaped like the real site's markup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn fetches_a_shot() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_site().build().await?;
//!
//!     let base_url = test.url();
//!     // Point the fetcher at `base_url`...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod fixture;
