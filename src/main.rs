mod cli;

use reelview::{
    api::ApiClient,
    catalog::{Catalog, CatalogSource},
    config::{self, Config},
    query::QueryState,
    table,
    views::{ViewStore, ViewsManager},
};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, OptionKind, QueryArgs, ViewCommands};
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "reelview=debug,reelview_common=debug".to_string()
        } else {
            "reelview=info,reelview_common=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Movies { view, query, json } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(list_movies(&config, view.as_deref(), &query, json))
        }
        Commands::Views { command } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_views(&config, command))
        }
        Commands::Options { kind } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(list_options(&config, kind))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("reelview {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Load the catalog, failing loudly if the backend could not be reached.
async fn load_catalog(client: Arc<ApiClient>) -> Result<Catalog> {
    let source: Arc<dyn CatalogSource> = client.clone();
    let catalog = Catalog::new(source);
    let outcome = catalog.refresh().await;
    if !outcome.movies_loaded {
        anyhow::bail!("Failed to fetch movies from {}", client.base_url());
    }
    Ok(catalog)
}

async fn mount_views(client: Arc<ApiClient>) -> Result<ViewsManager> {
    let store: Arc<dyn ViewStore> = client;
    let manager = ViewsManager::mount(store).await;
    if let Some(error) = manager.error() {
        anyhow::bail!("{}", error);
    }
    Ok(manager)
}

async fn list_movies(
    config: &Config,
    view_name: Option<&str>,
    args: &QueryArgs,
    json: bool,
) -> Result<()> {
    let client = Arc::new(ApiClient::new(&config.backend));
    let catalog = load_catalog(client.clone()).await?;

    let mut query = QueryState::default();
    if let Some(name) = view_name {
        let mut views = mount_views(client).await?;
        let id = views.require_by_name(name)?.id;
        views.load(Some(id), &mut query);
    }
    args.apply(&mut query);

    let movies = catalog.movies();
    let rows = query.visible(&movies);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!(
            "{}",
            table::render_table(&rows, &query, &config.display.date_format)
        );
        println!("{} of {} movies", rows.len(), movies.len());
    }

    Ok(())
}

async fn run_views(config: &Config, command: ViewCommands) -> Result<()> {
    let client = Arc::new(ApiClient::new(&config.backend));
    let mut views = mount_views(client).await?;

    match command {
        ViewCommands::List => {
            if views.views().is_empty() {
                println!("No saved views");
            }
            for view in views.views() {
                println!(
                    "{:>4}  {}  (sort: {} {})",
                    view.id, view.name, view.sorting.key, view.sorting.direction
                );
            }
        }
        ViewCommands::Show { name } => {
            let view = views.require_by_name(&name)?;
            println!("{}", serde_json::to_string_pretty(view)?);
        }
        ViewCommands::Save { name, query } => {
            views.set_view_name(name);
            let saved = views.save(&query.to_query()).await?;
            println!("Saved view {} ({})", saved.name, saved.id);
        }
        ViewCommands::Update { name, query: args } => {
            let id = views.require_by_name(&name)?.id;
            let mut query = QueryState::default();
            views.load(Some(id), &mut query);
            args.apply(&mut query);
            let updated = views.update_selected(&query).await?;
            println!("Updated view {} ({})", updated.name, updated.id);
        }
        ViewCommands::Delete { name } => {
            let id = views.require_by_name(&name)?.id;
            let mut query = QueryState::default();
            views.load(Some(id), &mut query);
            views.delete_selected().await?;
            println!("Deleted view {}", name);
        }
    }

    Ok(())
}

async fn list_options(config: &Config, kind: OptionKind) -> Result<()> {
    let client = Arc::new(ApiClient::new(&config.backend));
    let catalog = load_catalog(client).await?;
    let reference = catalog.reference();

    let options = match kind {
        OptionKind::Genres => reference.genre_options(),
        OptionKind::Countries => reference.country_options(),
        OptionKind::Directors => reference.director_options(),
        OptionKind::Actors => reference.actor_options(),
    };

    for option in options {
        println!("{:>4}  {}", option.value, option.label);
    }
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(path)?;
    println!("Configuration is valid");
    println!("  Backend: {}", config.backend.base_url);
    println!("  Timeout: {}s", config.backend.timeout_secs);
    println!("  Date format: {}", config.display.date_format);
    Ok(())
}
