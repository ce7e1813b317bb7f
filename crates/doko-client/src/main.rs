use anyhow::Context;
use clap::Parser;
use doko_client::config::Cli;
use doko_client::logging;
use doko_client::session::{Event, Session};
use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

/// Line-delimited JSON over stdio stands in for the lobby's framed
/// duplex channel; stderr carries the diagnostics.
fn main() -> anyhow::Result<()> {
    let options = Cli::parse().into_options()?;
    logging::init();
    tracing::info!(
        "joining table {:?} ({} action trees x {} rollouts)",
        options.table_name,
        options.action.n_trees,
        options.action.n_rollouts
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers)
        .build()
        .context("building the kernel worker pool")?;
    let (sender, receiver) = mpsc::channel();
    let mut session = Session::new(options, pool, sender.clone());

    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if sender.send(Event::Inbound(line)).is_err() {
                return;
            }
        }
        let _ = sender.send(Event::Shutdown);
    });

    for event in receiver {
        if matches!(event, Event::Shutdown) {
            break;
        }
        for frame in session.handle(event) {
            println!("{frame}");
        }
    }
    Ok(())
}
