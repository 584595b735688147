use clap::Parser;
use closet::{
    cli::{self, Cli, Commands},
    logging, utils, Config, Database, Profile,
};
use color_eyre::Result;

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Logs go next to the database; the guard flushes them on exit
    let _log_guard = match utils::get_data_dir(profile) {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            Some(logging::init_logging(&dir))
        }
        None => None,
    };

    let config = Config::load_with_profile(profile)?;

    let db_path = config.get_database_path();
    let db = Database::new(
        db_path
            .to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?,
    )?;

    // Dispatch to appropriate command handler
    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = closet::tui::App::new(config, profile, db)?;
            closet::tui::run_event_loop(app)?;
        }
        Commands::AddItem { name, category, color, brand, notes } => {
            cli::handle_add_item(name, category, color, brand, notes, &db)?;
        }
        Commands::List { category, laundry, json } => {
            cli::handle_list(category, laundry, json, &db)?;
        }
        Commands::Wash { item_id, wash_type } => {
            cli::handle_wash(item_id, wash_type, &db)?;
        }
        Commands::MarkDirty { item_id } => {
            cli::handle_mark_dirty(item_id, &db)?;
        }
        Commands::DeleteItem { item_id } => {
            cli::handle_delete_item(item_id, &db)?;
        }
        Commands::Generate { save, occasion } => {
            cli::handle_generate(save, occasion, &db)?;
        }
        Commands::Outfits { json } => {
            cli::handle_outfits(json, &db)?;
        }
        Commands::Favorite { outfit_id } => {
            cli::handle_favorite(outfit_id, &db)?;
        }
        Commands::DeleteOutfit { outfit_id } => {
            cli::handle_delete_outfit(outfit_id, &db)?;
        }
        Commands::Calendar { month } => {
            cli::handle_calendar(month, &db)?;
        }
    }

    Ok(())
}
