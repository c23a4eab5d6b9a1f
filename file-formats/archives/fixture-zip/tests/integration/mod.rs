//! Feature integration tests

mod archive;
mod builder;
