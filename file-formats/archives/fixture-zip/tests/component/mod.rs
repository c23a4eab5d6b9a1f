//! Component-level tests

mod compression;
