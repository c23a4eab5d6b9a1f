//! End-to-end scenario tests

mod interop;
mod round_trip;
