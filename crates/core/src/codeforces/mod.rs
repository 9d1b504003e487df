//! Codeforces API data source

mod client;
mod types;

pub use client::{parse_contest_list, CodeforcesClient, ContestSource, CONTEST_LIST_URL};
pub use types::*;
