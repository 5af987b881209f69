use std::sync::Arc;
use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Confirm};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::{
    cli::args::*,
    models::SessionId,
    repositories::{InMemoryCatalogRepository, JsonFileCartRepository},
    services::{CartService, CartServiceError, CatalogService, CatalogServiceError},
    utils::{
        formatting::{format_cart_table, format_melon_detail, format_melon_table},
        Config,
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static MELON: Emoji<'_, '_> = Emoji("🍈 ", "");

pub struct CliApp {
    config: Config,
    catalog_service: Arc<CatalogService>,
    cart_service: Arc<CartService>,
}

impl CliApp {
    pub async fn new(config: Config) -> Result<Self> {
        let catalog_repo = match &config.catalog_path {
            Some(path) => InMemoryCatalogRepository::from_file(path)
                .await
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
            None => InMemoryCatalogRepository::with_default_stock()
                .context("Failed to load built-in catalog")?,
        };
        let catalog = catalog_repo.catalog();
        let cart_repo = Arc::new(JsonFileCartRepository::new(config.session_dir.clone()));

        let catalog_service = Arc::new(CatalogService::new(Arc::new(catalog_repo)));
        let cart_service = Arc::new(CartService::new(cart_repo, catalog));

        Ok(Self {
            config,
            catalog_service,
            cart_service,
        })
    }

    pub async fn run(&self, args: Args) -> Result<()> {
        let session = SessionId::new(args.session).context("Invalid --session")?;

        match args.command {
            Commands::Melons { command } => self.handle_melon_command(command).await,
            Commands::Cart { command } => self.handle_cart_command(&session, command).await,
            Commands::Config { command } => self.handle_config_command(&session, command).await,
        }
    }

    // Catalog Commands
    async fn handle_melon_command(&self, command: MelonCommands) -> Result<()> {
        match command {
            MelonCommands::List { output } => self.handle_list_melons(output).await,
            MelonCommands::Show { id, output } => self.handle_show_melon(&id, output).await,
        }
    }

    async fn handle_list_melons(&self, output: OutputFormat) -> Result<()> {
        let melons = self.catalog_service.list_melons().await?;

        if output == OutputFormat::Json {
            return print_json(&melons);
        }

        if melons.is_empty() {
            println!("{} The catalog is empty", INFO);
            return Ok(());
        }

        println!("{} {}", MELON, style("Our Melons").bold().cyan());
        println!("{}", format_melon_table(&melons));
        Ok(())
    }

    async fn handle_show_melon(&self, id: &str, output: OutputFormat) -> Result<()> {
        match self.catalog_service.get_melon(id).await {
            Ok(melon) if output == OutputFormat::Json => print_json(&melon)?,
            Ok(melon) => {
                println!("{}", format_melon_detail(&melon));
                println!(
                    "Add it with {}",
                    style(format!("ubermelon cart add {}", melon.id)).cyan()
                );
            }
            Err(CatalogServiceError::MelonNotFound { id }) => {
                println!("{} No melon with id '{}'", CROSS, style(id).red());
            }
            Err(e) => {
                println!("{} Failed to load melon: {}", CROSS, style(&e).red());
                error!("Failed to load melon {}: {}", id, e);
            }
        }

        Ok(())
    }

    // Cart Commands
    async fn handle_cart_command(&self, session: &SessionId, command: CartCommands) -> Result<()> {
        match command {
            CartCommands::Add { id } => self.handle_add_to_cart(session, &id).await,
            CartCommands::Show { output } => self.handle_show_cart(session, output).await,
            CartCommands::Clear { force } => self.handle_clear_cart(session, force).await,
        }
    }

    async fn handle_add_to_cart(&self, session: &SessionId, id: &str) -> Result<()> {
        match self.cart_service.add_to_cart(session, id).await {
            Ok(_) => {
                println!("{} Melon successfully added to cart!", CHECKMARK);
                self.handle_show_cart(session, OutputFormat::Table).await?;
            }
            Err(CartServiceError::MelonNotFound { id }) => {
                println!("{} No melon with id '{}'", CROSS, style(&id).red());
                println!("Use {} to see what is for sale", style("ubermelon melons list").cyan());
            }
            Err(e) => {
                println!("{} Failed to add melon: {}", CROSS, style(&e).red());
                error!("Failed to add melon {} to cart: {}", id, e);
            }
        }

        Ok(())
    }

    async fn handle_show_cart(&self, session: &SessionId, output: OutputFormat) -> Result<()> {
        match self.cart_service.get_cart(session).await {
            Ok(summary) if output == OutputFormat::Json => print_json(&summary)?,
            Ok(summary) if summary.is_empty() => {
                println!("{} Your cart is empty", INFO);
            }
            Ok(summary) => {
                println!("{} {}", MELON, style(format!("Cart ({})", session)).bold().cyan());
                println!("{}", format_cart_table(&summary));
            }
            Err(CartServiceError::MelonNotFound { id }) => {
                println!(
                    "{} Your cart holds '{}', which is no longer sold",
                    WARNING,
                    style(&id).yellow()
                );
                println!("Use {} to start over", style("ubermelon cart clear").cyan());
                warn!("Cart for session {} references unknown melon {}", session, id);
            }
            Err(e) => {
                println!("{} Failed to load cart: {}", CROSS, style(&e).red());
                error!("Failed to load cart for session {}: {}", session, e);
            }
        }

        Ok(())
    }

    async fn handle_clear_cart(&self, session: &SessionId, force: bool) -> Result<()> {
        if !force {
            let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("Empty the cart for session '{}'?", session))
                .default(false)
                .interact()?;
            if !confirmed {
                println!("{} Cart left unchanged", INFO);
                return Ok(());
            }
        }

        match self.cart_service.end_session(session).await {
            Ok(true) => {
                println!("{} Cart emptied", CHECKMARK);
                info!("Cart cleared for session {}", session);
            }
            Ok(false) => println!("{} Cart was already empty", INFO),
            Err(e) => {
                println!("{} Failed to clear cart: {}", CROSS, style(&e).red());
                error!("Failed to clear cart for session {}: {}", session, e);
            }
        }

        Ok(())
    }

    // Config Commands
    async fn handle_config_command(&self, session: &SessionId, command: ConfigCommands) -> Result<()> {
        match command {
            ConfigCommands::Show => {
                let melon_count = self.catalog_service.count_melons().await?;
                let catalog_source = self
                    .config
                    .catalog_path
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "built-in".to_string());

                println!("{} {}", INFO, style("Configuration").bold().cyan());
                println!("Environment: {}", style(&self.config.environment).green());
                println!("Catalog: {} ({} melons)", style(catalog_source).green(), melon_count);
                println!("Session dir: {}", style(self.config.session_dir.display()).green());
                println!("Session: {}", style(session).green());
                println!("Log level: {}", style(&self.config.log_level).green());
            }
        }

        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
