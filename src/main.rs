//! matchbook - Binary Entry Point
//!
//! Drives a short matching session against one book and prints the emitted
//! action stream as JSON lines.

use matchbook::{Order, OrderBook, Side};

fn main() {
    tracing_subscriber::fmt().init();

    let mut book = OrderBook::with_capacity(1_000);
    let mut actions = Vec::new();

    // A small session: resting sells, a sweeping buy, a cancellation.
    let session = [
        Order::new(1, Side::Sell, 10_050, 10),
        Order::new(2, Side::Sell, 10_050, 5),
        Order::new(3, Side::Sell, 10_075, 20),
        Order::new(4, Side::Buy, 10_060, 12),
        Order::new(5, Side::Buy, 10_000, 8),
    ];

    for order in session {
        if let Err(err) = book.submit(order, &mut actions) {
            eprintln!("rejected: {err}");
        }
    }
    book.cancel_order(3, &mut actions);
    book.cancel_order(999, &mut actions);

    for action in &actions {
        match serde_json::to_string(action) {
            Ok(line) => println!("{line}"),
            Err(err) => eprintln!("serialize error: {err}"),
        }
    }

    println!();
    println!(
        "book: {} orders held, best bid {}, best ask {}",
        book.order_count(),
        book.best_bid(),
        book.best_ask()
    );
}
