use anyhow::Result;
use clap::Parser;
use menu_core::render::{render_menu, to_text};
use menu_core::settings::{JsonFileStore, SettingsManager};
use menu_core::transform::{transform, transform_lenient};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod source;

use source::MenuSource;

#[derive(Parser, Debug)]
#[command(
    name = "menu-viewer",
    version,
    about = "Render a published restaurant menu in the terminal"
)]
struct Args {
    /// Published snapshot: local path or http(s) URL
    #[arg(long)]
    source: String,

    /// Display language; remembered for later runs
    #[arg(long)]
    lang: Option<String>,

    /// Hide allergy information; remembered for later runs
    #[arg(long, conflicts_with = "show_allergies")]
    hide_allergies: bool,

    /// Show allergy information again
    #[arg(long)]
    show_allergies: bool,

    /// Viewer settings file
    #[arg(long, default_value = "menu-viewer.json")]
    settings: String,

    /// Drop malformed items instead of refusing the whole menu
    #[arg(long)]
    lenient: bool,

    /// Print the rendered view as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut manager = SettingsManager::load(JsonFileStore::new(&args.settings))?;
    if let Some(lang) = &args.lang {
        manager.set_language(lang)?;
    }
    if args.hide_allergies {
        manager.set_show_allergies(false)?;
    } else if args.show_allergies {
        manager.set_show_allergies(true)?;
    }
    let settings = manager.settings().clone();

    let raw = MenuSource::parse(&args.source).fetch().await?;
    let menu = if args.lenient {
        let (menu, dropped) = transform_lenient(&raw)?;
        if !dropped.is_empty() {
            warn!("{} malformed entries were left out", dropped.len());
        }
        menu
    } else {
        transform(&raw)?
    };

    if !menu.languages.iter().any(|l| *l == settings.language) {
        info!(
            "Menu {} has no '{}' translation, showing {}",
            menu.id, settings.language, menu.default_language
        );
    }

    let view = render_menu(&menu, &settings);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", to_text(&view, &menu.default_language));
    }

    Ok(())
}
