//! Desktop Defender
//!
//! A cybersecurity awareness mini-game: a threat appears on a simulated
//! desktop each wave, and you pick the defence that neutralizes it.

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use desktop_defender::tui::App;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;

fn main() -> anyhow::Result<()> {
    // A broken catalog must abort before the terminal is touched.
    let mut app = App::new().context("failed to initialize game")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    while app.running {
        // Draw
        terminal.draw(|frame| {
            app.render(frame);
        })?;

        // Handle input
        if !app.handle_input()? {
            break;
        }
    }

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  Thanks for playing Desktop Defender!                  ║");
    println!("║                                                        ║");
    println!("║  Stay vigilant out there.                              ║");
    println!("╚════════════════════════════════════════════════════════╝\n");

    Ok(())
}
