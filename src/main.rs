//! `autocomplete-kit` - drive an autocomplete widget from the terminal.
//!
//! Each stdin line replaces the query (an empty line clears it). Lines
//! starting with `:` are commands:
//!
//! ```text
//! :up :down :enter :esc   keyboard navigation
//! :pick N                 click the N-th suggestion (1-based)
//! :blur :focus            move focus away from / back to the input
//! :quit                   exit
//! ```
//!
//! After every line the loop waits for the debounce and any lookup to
//! settle, then prints the dropdown. Committed values are printed as
//! `onChange: <value>`.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info, warn};

use autocomplete_kit::config::{self, AppConfig};
use autocomplete_kit::list_item::ItemEvent;
use autocomplete_kit::render::{self, Emphasis};
use autocomplete_kit::sources::{CurrencySource, NominatimSource};
use autocomplete_kit::{Autocomplete, LoadData, NavKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    /// Bundled ISO 4217 currency list
    Currency,
    /// Nominatim geocoding search
    Region,
}

#[derive(Debug, Parser)]
#[command(name = "autocomplete-kit", version, about = "Search-as-you-type suggestions in the terminal")]
struct Cli {
    /// Data source to search
    #[arg(long, value_enum, default_value_t = SourceKind::Currency)]
    source: SourceKind,

    /// Config file (default: ~/.autocomplete-kit/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Mark matches with [brackets] instead of ANSI bold
    #[arg(long)]
    plain: bool,

    /// Also log to stderr
    #[arg(long, short)]
    verbose: bool,
}

/// A parsed stdin line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Query(String),
    Key(NavKey),
    Pick(usize),
    Blur,
    Focus,
    Quit,
}

fn parse_command(line: &str) -> Result<Command> {
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Query(line.to_string()));
    };
    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or("");
    if let Some(key) = NavKey::from_name(name) {
        return Ok(Command::Key(key));
    }
    let command = match name {
        "pick" => {
            let n: usize = parts
                .next()
                .context("`:pick` needs a suggestion number")?
                .parse()
                .context("`:pick` number must be a positive integer")?;
            anyhow::ensure!(n >= 1, "suggestions are numbered from 1");
            Command::Pick(n - 1)
        }
        "blur" => Command::Blur,
        "focus" => Command::Focus,
        "quit" | "q" => Command::Quit,
        other => anyhow::bail!("unknown command `:{}`", other),
    };
    Ok(command)
}

fn build_widget(source: SourceKind, app: &AppConfig) -> Autocomplete {
    let (config, loader): (_, Arc<dyn LoadData>) = match source {
        SourceKind::Currency => (
            app.currency.clone(),
            Arc::new(CurrencySource::new(app.currency_limit)),
        ),
        SourceKind::Region => (
            app.region.clone(),
            Arc::new(NominatimSource::new(app.nominatim.clone())),
        ),
    };
    Autocomplete::with_shared_loader(config, loader).on_change(|value| {
        println!("onChange: {}", value);
    })
}

/// Block until no timer is pending and no lookup is outstanding.
fn settle(widget: &mut Autocomplete) {
    let settlements = widget.settlements();
    loop {
        widget.tick(Instant::now());

        if let Some(deadline) = widget.next_deadline() {
            thread::sleep(deadline.saturating_duration_since(Instant::now()));
            continue;
        }
        if widget.is_loading() {
            match settlements.recv_blocking() {
                Ok(settlement) => {
                    widget.apply_settlement(settlement);
                }
                Err(e) => {
                    warn!(error = %e, "Settlement channel closed");
                    break;
                }
            }
            continue;
        }
        break;
    }
}

fn print_view(widget: &Autocomplete, emphasis: Emphasis) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", render::to_plain_text(&widget.view(), emphasis))?;
    stdout.flush()
}

fn run(cli: Cli) -> Result<()> {
    let app = config::load_config(cli.config.as_deref());
    let emphasis = if cli.plain {
        Emphasis::Brackets
    } else {
        Emphasis::Ansi
    };

    let mut widget = build_widget(cli.source, &app);
    info!(source = ?cli.source, "Widget ready");

    widget.focus(Instant::now());
    print_view(&widget, emphasis)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let line = line.trim_end_matches('\r');

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("error: {:#}", e);
                continue;
            }
        };
        debug!(?command, "Command");

        let now = Instant::now();
        match command {
            Command::Query(text) => widget.input(&text, now),
            Command::Key(key) => {
                widget.key(key, now);
            }
            Command::Pick(index) => match widget.view().items().get(index) {
                Some(item) => {
                    let event: ItemEvent = item.activate();
                    widget.handle_item_event(event, now);
                }
                None => {
                    eprintln!("error: no suggestion #{}", index + 1);
                    continue;
                }
            },
            Command::Blur => widget.blur(now),
            Command::Focus => widget.focus(now),
            Command::Quit => break,
        }

        settle(&mut widget);
        print_view(&widget, emphasis)?;
    }

    info!(query = %widget.query(), "Input closed");
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let _guard = autocomplete_kit::logging::init(!cli.verbose);

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "autocomplete-kit failed");
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
