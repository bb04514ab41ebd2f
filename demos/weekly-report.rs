//! This is an example of how taskmaster can be used.
//! This binary prints the week grid and the per-day completion counts of a seeded store.

use taskmaster::utils::{pause, print_daily_series, print_week_matrix};

mod shared;
use shared::demo_session;


#[tokio::main]
async fn main() {
    env_logger::init();

    println!("This example works on an in-memory store, seeded with a few tasks.");
    println!("You can set the RUST_LOG environment variable to display more info about what the session does.");
    println!("");
    pause();

    let mut session = demo_session().await;

    // Mark today's first pending task, so the grid has something from today too
    let today = session.today();
    let pending = session.due_on(today).iter()
        .find(|due| due.completed == false)
        .map(|due| due.task.id());
    if let Some(id) = pending {
        session.toggle(id, today).await.unwrap();
    }

    println!("---- Week of {} ----", session.window().first());
    print_week_matrix(&session.week_matrix());

    println!("");
    println!("---- Completions per day ----");
    print_daily_series(&session.daily_series());
}
