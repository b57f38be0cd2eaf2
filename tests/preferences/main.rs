#[path = "../common/mod.rs"]
mod common;

mod concurrency;
mod keypaths;
mod pointers;
mod queries;
mod scenario;
mod segment_policy;
mod typed;
