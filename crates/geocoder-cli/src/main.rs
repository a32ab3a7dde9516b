//! geocoder — terminal front end for the geocoder-core search control
//!
//! Usage examples
//! --------------
//! ```bash
//! geocoder search "Kurfürstendamm 21"
//! geocoder --language fr --limit 3 search "Genève"
//! geocoder reverse 48.8584 2.2945
//! geocoder --options control.json repl --while-typing
//! ```
//!
//! REPL commands
//! -------------
//! - any text: typed into the search box
//! - empty line: Enter
//! - `:N`: pick row N
//! - `:up` / `:down`: move the highlight
//! - `:clear`: clear the box
//! - `:q`: quit

mod args;

use anyhow::Context;
use args::{CliArgs, Commands};
use clap::Parser;
use geocoder_cli::{locale_from_env, TerminalMap, TerminalView};
use geocoder_core::prelude::*;
use std::rc::Rc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let geocoder = build_geocoder(&args)?;

    geocoder.on(EventKind::Result, |event| {
        if let GeocoderEvent::Result { result } = event {
            match result.location() {
                Some(at) => println!("= {} ({:.5}, {:.5})", result.place_name, at.lat, at.lng),
                None => println!("= {}", result.place_name),
            }
        }
    });
    geocoder.on(EventKind::Error, |event| {
        if let GeocoderEvent::Error { error } = event {
            tracing::debug!("geocoder error: {error}");
        }
    });

    match args.command {
        Commands::Search { query } => {
            geocoder.query(&query).await;
        }
        Commands::Reverse { lat, lon } => {
            geocoder.query(&format!("{lat}, {lon}")).await;
        }
        Commands::Repl { .. } => repl(&geocoder).await?,
    }

    Ok(())
}

fn build_geocoder(args: &CliArgs) -> anyhow::Result<Geocoder> {
    let mut options = match &args.options {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading options from {}", path.display()))?;
            ControlOptions::from_json(&json)?
        }
        None => ControlOptions::default(),
    };
    if args.local_only {
        options.local_geocoder_only = true;
    }
    if let Some(language) = &args.language {
        options.language = Some(language.clone());
    }
    if let Some(limit) = args.limit {
        options.limit = limit;
    }
    match &args.command {
        Commands::Reverse { .. } => options.reverse_geocode = true,
        Commands::Repl { while_typing } => {
            options.show_results_while_typing |= *while_typing;
        }
        Commands::Search { .. } => {}
    }

    let api = match &args.url {
        Some(url) => Nominatim::with_base_url(url.as_str())?,
        None => Nominatim::new()?,
    };

    let mut builder = Geocoder::builder(Rc::new(api))
        .options(options)
        .view(Rc::new(TerminalView::stdout(locale_from_env())));
    if let Some(path) = &args.places {
        let index = LocalIndex::load(path)
            .with_context(|| format!("loading gazetteer {}", path.display()))?;
        tracing::info!(places = index.len(), "gazetteer loaded");
        builder = builder.local_geocoder(Rc::new(index));
    } else if args.local_only {
        anyhow::bail!("--local-only needs a gazetteer (--places)");
    }

    let geocoder = builder.build();
    geocoder.add_to(Container::Map(Rc::new(TerminalMap::stdout())))?;
    Ok(geocoder)
}

async fn repl(geocoder: &Geocoder) -> anyhow::Result<()> {
    println!("{} (:q to quit)", geocoder.placeholder());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            ":q" | ":quit" => break,
            ":clear" => geocoder.clear(),
            ":up" => {
                geocoder.on_key(Key::ArrowUp).await;
            }
            ":down" => {
                geocoder.on_key(Key::ArrowDown).await;
            }
            "" => {
                geocoder.on_key(Key::Enter).await;
            }
            _ => {
                if let Some(row) = line.strip_prefix(':') {
                    match row.parse::<usize>() {
                        Ok(n) if n >= 1 => {
                            geocoder.select(n - 1).await;
                        }
                        _ => eprintln!("unknown command {line:?}"),
                    }
                    continue;
                }
                type_text(geocoder, line).await;
            }
        }
    }
    Ok(())
}

/// Feed a line through the input path, as if typed then left alone.
async fn type_text(geocoder: &Geocoder, text: &str) {
    let ticket = geocoder.on_input(text);
    if !geocoder.options().show_results_while_typing {
        geocoder.on_key(Key::Enter).await;
        return;
    }
    if let Some(ticket) = ticket {
        tokio::time::sleep(ticket.delay).await;
        geocoder.on_debounce_elapsed(ticket).await;
    }
}
