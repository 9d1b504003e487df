//! Quick check of the Codeforces contest list

use std::collections::BTreeSet;

use cf_dashboard_core::codeforces::{CodeforcesClient, ContestSource};
use cf_dashboard_core::{derive_view, paginate, ContestStats, FilterCriteria};

#[tokio::main]
async fn main() {
    let search = std::env::args().nth(1).unwrap_or_default();

    let client = match CodeforcesClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            std::process::exit(1);
        }
    };

    println!("Fetching contests from {}...\n", client.endpoint());

    let contests = match client.fetch_contest_list().await {
        Ok(contests) => contests,
        Err(e) => {
            eprintln!("Failed to fetch contests: {}", e);
            std::process::exit(1);
        }
    };

    let stats = ContestStats::from_contests(&contests);
    println!("Total contests: {}", stats.total);
    println!("Average duration: {} hours", stats.average_duration_hours);
    println!("Upcoming: {}\n", stats.upcoming);

    let criteria = FilterCriteria::new().search(&search);
    let view = derive_view(&contests, &criteria, &BTreeSet::new());

    match paginate(&view.contests, 1, 10) {
        Ok(page) => {
            println!("Matching \"{}\": {} contests, {} pages\n", search, view.contests.len(), page.page_count);
            for contest in &page.items {
                println!("  [{}] {} ({}, {})", contest.id, contest.name, contest.kind, contest.phase);
            }
        }
        Err(e) => eprintln!("Failed to paginate: {}", e),
    }

    println!("\nContest types:");
    for point in &view.by_type {
        println!("  {}: {}", point.name, point.value);
    }
}
