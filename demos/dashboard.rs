//! This is an example of how taskmaster can be used.
//! This binary marks everything that is due today as done, and prints the dashboard numbers.

use taskmaster::session::event_channel;
use taskmaster::utils::{pause, print_due_list};

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
    let today = session.today();

    println!("---- Due today ({}) ----", today);
    print_due_list(today, &session.due_on(today));

    // Follow the changes the session applies
    let (sender, mut events) = event_channel();
    session.set_event_sender(sender);

    let pending: Vec<_> = session.due_on(today).iter()
        .filter(|due| due.completed == false)
        .map(|due| due.task.id())
        .collect();
    println!("");
    println!("Marking {} tasks as done...", pending.len());
    for id in pending {
        session.toggle(id, today).await.unwrap();
    }
    while let Ok(event) = events.try_recv() {
        println!("  * {}", event);
    }

    println!("");
    println!("---- Due today, once everything is marked ----");
    print_due_list(today, &session.due_on(today));

    let stats = session.dashboard_stats();
    println!("");
    println!("{} tasks in total, {} completions today, {:.0}% of the list completed.",
             stats.total_tasks, stats.completed_today, stats.completion_rate);
}
