// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;

use kumite_desk::{AthleteRegistry, SessionGuard};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "export" {
        // Export mode
        run_export()?;
    } else {
        // Desk mode (default)
        run_desk_mode()?;
    }

    Ok(())
}

fn run_export() -> Result<()> {
    println!("🥋 Kumite Desk - Athlete Export");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let registry = AthleteRegistry::with_defaults();

    println!("\n📋 {} athletes registered", registry.count());

    let csv = registry.export_csv()?;
    let out_path = "athletes.csv";
    std::fs::write(out_path, csv)?;

    println!("✓ Roster written to {}", out_path);

    Ok(())
}

#[cfg(feature = "tui")]
fn run_desk_mode() -> Result<()> {
    use kumite_desk::CategoryRegistry;
    use std::io::{self, BufRead, Write};

    println!("🥋 Loading Kumite Desk...\n");

    // Restore any stored session before asking for credentials
    let mut guard = SessionGuard::new();
    guard.restore()?;

    if let Some(user) = guard.current_user() {
        println!("✓ Welcome back, {}!\n", user.username);
    } else {
        let stdin = io::stdin();
        loop {
            print!("Username: ");
            io::stdout().flush()?;
            let mut username = String::new();
            stdin.lock().read_line(&mut username)?;

            print!("Password: ");
            io::stdout().flush()?;
            let mut password = String::new();
            stdin.lock().read_line(&mut password)?;

            match guard.login(username.trim(), password.trim()) {
                Ok(user) => {
                    println!("\n✓ Welcome, {}!\n", user.username);
                    break;
                }
                Err(e) => eprintln!("❌ {}\n", e),
            }
        }
    }

    let user = guard
        .current_user()
        .cloned()
        .expect("login loop only exits with a session");

    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(
        AthleteRegistry::with_defaults(),
        CategoryRegistry::with_defaults(),
        user,
    );
    ui::run_ui(&mut app)?;

    if app.logout_requested {
        guard.logout();
        println!("\n✓ Logged out");
    }

    println!("\n✅ Desk closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_desk_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use web UI: cargo run --bin kumite-server --features server");
    std::process::exit(1);
}
