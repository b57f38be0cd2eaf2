#[path = "../common/mod.rs"]
mod common;

mod handle_lifetimes;
mod marshal_round_trip;
