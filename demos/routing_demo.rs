//! Routing Demo
//!
//! Interactive terminal shell over the demo route table. Type a path to
//! navigate, answer guard questions with y/n.
//!
//! ```text
//! cargo run --example routing_demo
//! RUST_LOG=guard_navigator=debug cargo run --example routing_demo
//! ```

use guard_navigator::app::{self, FormView, ProductView};
use guard_navigator::{
    listener_fn, Confirm, NavigationEvent, NavigationResult, Router, RouterOptions,
};
use std::io::{self, BufRead, Write};

// ============================================================================
// Terminal confirmation
// ============================================================================

/// Asks guard questions on stdout and reads the answer from stdin.
struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, message: &str) -> bool {
        print!("? {message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let options = RouterOptions::new().history_limit(50);
    let mut router = Router::with_options(app::routes()?, TerminalConfirm, options);
    router.add_listener(listener_fn(|event: &NavigationEvent| {
        if let NavigationEvent::NotFound { to, .. } = event {
            println!("  (no page at {to})");
        }
    }));

    print_help();
    let result = router.navigate("");
    report(&router, result);

    let stdin = io::stdin();
    loop {
        print!("{}> ", router.current_path().unwrap_or(""));
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "" => {}
            "quit" | "exit" => break,
            "help" => print_help(),
            "back" => match router.back() {
                Some(result) => report(&router, result),
                None => println!("  nothing to go back to"),
            },
            "forward" => match router.forward() {
                Some(result) => report(&router, result),
                None => println!("  nothing to go forward to"),
            },
            "edit" | "save" => match router.view_state_mut::<FormView>() {
                Some(form) if line.trim() == "edit" => {
                    form.set_unsaved_changes(true);
                    println!("  form has unsaved changes");
                }
                Some(form) => {
                    form.save();
                    println!("  form saved");
                }
                None => println!("  not on the form page"),
            },
            "history" => {
                let current = router.state().current_index();
                for (index, location) in router.state().history().iter().enumerate() {
                    let marker = if Some(index) == current { "*" } else { " " };
                    println!("  {marker} {index}: {location}");
                }
            }
            path => {
                let result = router.navigate(path);
                report(&router, result);
            }
        }
    }

    Ok(())
}

fn report(router: &Router, result: NavigationResult) {
    match result {
        NavigationResult::Activated { path, view, .. } => {
            println!("  showing '{view}' at {path}");
            if let Some(product) = router.view_state::<ProductView>() {
                println!("  product id: {}", product.product_id().unwrap_or("(none)"));
            }
        }
        NavigationResult::Cancelled { reason } => {
            println!("  navigation cancelled: {reason}");
        }
        NavigationResult::NotFound { .. } => {}
        NavigationResult::Error(err) => println!("  error: {err}"),
    }
}

fn print_help() {
    println!("Paths: /home /about /dashboard /product/<id> /form");
    println!("Commands: back forward history edit save help quit");
}
