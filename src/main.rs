use std::process;
#[macro_use]
extern crate log;

mod features;
use features::{AccountFilter, Store};

fn main() {
    env_logger::init();
    if run().is_err() {
        process::exit(1);
    }
}

fn run() -> anyhow::Result<Store> {
    let store = Store::new();

    let checking = store.create_account("checking", "john", 10.0)?;
    let savings = store.create_account("savings", "jane", 20.0)?;

    let transfer = store.create_transfer(checking.id().clone(), savings.id().clone(), 9.0)?;
    info!(
        "committed transfer {} at {}",
        transfer.id().map(|id| id.to_string()).unwrap_or_default(),
        transfer
            .timestamp()
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_default()
    );

    // More than jane has: rejected, both balances untouched.
    if let Err(e) = store.create_transfer(savings.id().clone(), checking.id().clone(), 1_000_000.0)
    {
        warn!("{e}");
    }

    store.deposit(checking.id(), 30.0)?;
    store.withdraw(checking.id(), 30.0)?;

    let accounts = store.list_accounts(&AccountFilter::default(), Some("-balance"));
    println!("{}", serde_json::to_string_pretty(&accounts)?);

    Ok(store)
}
