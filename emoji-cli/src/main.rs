//! # Download Emoji
//!
//! Browse the emoji catalog and download emoji images from the terminal.

use anyhow::Context;
use clap::Parser;
use emoji_cli::view;
use emoji_cli::{
    find_renderable, implied_variation, resolve_category, CliArgs, Command, DownloadClient,
    PickerConfig,
};
use emoji_core::{Catalog, DownloadPlan, EmojiStore, SelectionState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,emoji_cli=debug,emoji_core=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,emoji_cli=debug,emoji_core=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = PickerConfig::from(&args);

    let store = EmojiStore::load(&config.dataset)
        .with_context(|| format!("failed to load emoji table {}", config.dataset.display()))?;
    let catalog = Catalog::new(store, &config.catalog);
    let mut state = SelectionState::new();

    match args.command {
        Command::Categories => {
            print!("{}", view::render_tabs(&catalog, state.selected_category_index()));
        }
        Command::List { category, json } => {
            let index = resolve_category(&catalog, &category)?;
            state.select_category(index);
            let cells = view::grid_cells(&catalog, index, &config.endpoints)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&cells)?);
            } else {
                print!("{}", view::render_tabs(&catalog, state.selected_category_index()));
                println!();
                print!("{}", view::render_grid(&cells));
            }
        }
        Command::Show { emoji } => {
            let record = find_renderable(&catalog, &emoji)?;
            state.open_emoji(record);
            if let Some(key) = implied_variation(record, &emoji) {
                state.select_variation(key)?;
            }
            print!("{}", view::render_detail(record, &state, &config.endpoints));
        }
        Command::Download {
            emoji,
            variation,
            size,
            format,
            out,
        } => {
            let record = find_renderable(&catalog, &emoji)?;
            if let Some(index) = catalog.category_index(&record.category) {
                state.select_category(index);
            }
            state.open_emoji(record);
            let variation = variation
                .as_deref()
                .or_else(|| implied_variation(record, &emoji));
            if let Some(key) = variation {
                state.select_variation(key)?;
            }
            state.set_output_format(format);
            state.set_output_size(&size);

            let plan = DownloadPlan::new(record, &state, &config.endpoints)?;
            tracing::info!(
                session = %state.session_id(),
                "Downloading {} as {}",
                plan.codepoint,
                plan.file_name
            );

            let client = DownloadClient::new()?;
            state.begin_download();
            let result = client.download(&plan, &out).await;
            state.end_download();

            match result {
                Ok(path) => println!("{}", path.display()),
                Err(e) => {
                    tracing::error!("Download of {} failed: {e}", plan.codepoint);
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}
