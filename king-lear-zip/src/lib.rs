//! King Lear zip fixture
//!
//! Writes `out.zip`: the bundled King Lear text stored, deflated (level 9)
//! and bzip2-compressed (level 9), repeated 50 times, for exercising zip
//! readers against many entries of every common method.

pub mod config;
pub mod error;
pub mod fixture;

pub use config::FixtureConfig;
pub use error::{FixtureError, Result};
pub use fixture::{EntrySpec, FixturePlan, FixtureSummary, build_fixture, entry_name, verify_fixture};
