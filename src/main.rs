//! Interactive demo for the tuft engine.
//!
//! Builds a sample view out of utility-classed elements and runs the frame
//! loop against the real terminal.  Tab/arrows move focus, Enter/Space
//! activates, `q` quits.  Run with `--dry-run` to lay out and render one
//! frame headless (useful when hacking on the layout passes).

use std::io::{self, stdout, Write};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use tuft::app::{event::spawn_event_reader, App, AppEvent, Message};
use tuft::dom::{Element, ElementKind};
use tuft::layout::ViewportInfo;
use tuft::render::writer;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Utility-class terminal UI demo")]
struct Cli {
    /// Render a single frame without touching the terminal, print the
    /// draw-op count, and exit.
    #[arg(long)]
    dry_run: bool,

    /// Viewport width for --dry-run (cells).
    #[arg(long, default_value_t = 80)]
    width: u16,

    /// Viewport height for --dry-run (cells).
    #[arg(long, default_value_t = 24)]
    height: u16,
}

// ───────────────────────────────────────── demo view ─────────

/// A small kitchen-sink view: flex header, grid body, a form column, and a
/// floating badge with a drop shadow.
fn demo_view() -> Element {
    let header = Element::new(ElementKind::Box)
        .with_classes(&["flex-row", "justify-between", "h-1", "bg-darkgray"])
        .with_child(
            Element::new(ElementKind::Text)
                .with_classes(&["title", "text-cyan"])
                .with_text("tuft demo"),
        )
        .with_child(
            Element::new(ElementKind::Text)
                .with_id("status")
                .with_classes(&["muted"])
                .with_text("ready"),
        );

    let cards = Element::new(ElementKind::Box)
        .with_classes(&["grid-cols-3", "gap-2", "h-6", "mt-1"])
        .with_child(card("alpha", "text-green"))
        .with_child(card("beta", "text-yellow"))
        .with_child(card("gamma", "text-magenta"));

    let form = Element::new(ElementKind::Box)
        .with_classes(&["mt-1", "p-1"])
        .with_child(
            Element::new(ElementKind::Input)
                .with_id("name")
                .with_attr("value", "type here")
                .focusable(),
        )
        .with_child(
            Element::new(ElementKind::Checkbox)
                .with_id("opt-in")
                .with_text("subscribe")
                .with_classes(&["mt-1"])
                .focusable(),
        )
        .with_child(radio("size-s", "small"))
        .with_child(radio("size-l", "large"))
        .with_child(
            Element::new(ElementKind::Button)
                .with_id("submit")
                .with_text("Submit")
                .with_classes(&["mt-1"])
                .focusable(),
        );

    let badge = Element::new(ElementKind::Box)
        .with_classes(&[
            "absolute", "top-2", "left-60", "w-14", "h-3", "floating", "shadow", "bg-blue", "p-1",
        ])
        .with_child(
            Element::new(ElementKind::Text)
                .with_classes(&["bold", "text-white"])
                .with_text("overlay!"),
        );

    Element::new(ElementKind::Box)
        .with_classes(&["h-full"])
        .with_child(header)
        .with_child(cards)
        .with_child(form)
        .with_child(badge)
}

fn card(label: &str, color: &str) -> Element {
    Element::new(ElementKind::Box)
        .with_classes(&["card", "bg-black"])
        .with_child(
            Element::new(ElementKind::Text)
                .with_classes(&[color])
                .with_text(label),
        )
}

fn radio(id: &str, label: &str) -> Element {
    Element::new(ElementKind::Radio)
        .with_id(id)
        .with_text(label)
        .with_attr("group", "size")
        .with_classes(&["mt-1"])
        .focusable()
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only active when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute the frame stream
        .init();

    let cli = Cli::parse();

    if cli.dry_run {
        let mut app = App::new(demo_view(), ViewportInfo::new(cli.width, cli.height));
        let ops = app.frame()?;
        println!("{} draw ops for {}x{}", ops.len(), cli.width, cli.height);
        return Ok(());
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, Hide)?;

    let (width, height) = crossterm::terminal::size()?;
    let mut app = App::new(demo_view(), ViewportInfo::new(width, height));

    let (tx, mut events) = spawn_event_reader(Duration::from_millis(100));

    // A collaborator timer: after a moment, update the status line through
    // the same queue every other event uses.
    let timer_tx = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(3)).await;
        let _ = timer_tx.send(AppEvent::Synthetic(Message::SetText {
            id: "status".into(),
            text: "timer fired".into(),
        }));
    });

    // ── frame loop ────────────────────────────────────────────
    // Draw first, then block for the next event; every event triggers a
    // full relayout and repaint.
    let run = async {
        loop {
            let ops = app.frame()?;
            writer::flush_frame(&mut out, &ops)?;

            let Some(event) = events.recv().await else {
                break;
            };
            app.handle_event(event);

            if app.should_quit() {
                break;
            }
        }
        anyhow::Ok(())
    };
    let result = run.await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, Show)?;
    stdout().flush()?;

    result
}
