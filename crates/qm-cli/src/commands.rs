use std::sync::Arc;

use colored::Colorize;
use qm_auth::TokenCodec;
use qm_ledger::StockAuditor;
use qm_server::{QmServer, ServerConfig};
use qm_store::{InMemoryInventory, InventoryStore};
use qm_types::UserId;

use crate::cli::{AuditArgs, Cli, Command, ConfigArgs, ServeArgs, TokenArgs};
use crate::seed;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Token(args) => cmd_token(args),
        Command::Audit(args) => cmd_audit(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn load_config(path: Option<&str>) -> anyhow::Result<ServerConfig> {
    Ok(match path {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    })
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind.parse()?;
    }
    if let Some(secret) = args.secret {
        config.token_secret = secret;
    }

    let store: Arc<dyn InventoryStore> = Arc::new(InMemoryInventory::new());
    if args.seed {
        let codec = TokenCodec::new(config.token_secret.clone());
        let accounts = seed::load(store.clone())?;
        println!("{} Seeded demonstration data", "✓".green().bold());
        for account in accounts {
            let token = codec.mint(account.id, config.token_ttl_secs)?;
            println!(
                "  {} {} ({})",
                account.role.to_string().cyan(),
                account.email.bold(),
                account.id
            );
            println!("    {}", token.dimmed());
        }
    }

    println!(
        "{} Serving on {}",
        "✓".green().bold(),
        config.bind_addr.to_string().bold()
    );
    QmServer::new(config, store).serve().await?;
    Ok(())
}

fn cmd_token(args: TokenArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(secret) = args.secret {
        config.token_secret = secret;
    }

    let subject: UserId = args.user.parse()?;
    let ttl = args.ttl.unwrap_or(config.token_ttl_secs);
    let token = TokenCodec::new(config.token_secret).mint(subject, ttl)?;
    println!("{token}");
    Ok(())
}

fn cmd_audit(args: AuditArgs) -> anyhow::Result<()> {
    let store: Arc<dyn InventoryStore> = Arc::new(InMemoryInventory::new());
    if args.seed {
        seed::load(store.clone())?;
    }

    let report = StockAuditor::audit(store.as_ref())?;
    println!(
        "Checked {} items against {} purchase and {} issue rows",
        report.items_checked.to_string().bold(),
        report.purchases_scanned,
        report.issues_scanned
    );
    if report.is_clean() {
        println!("{} Stock identity holds for every item", "✓".green().bold());
        Ok(())
    } else {
        for violation in &report.violations {
            println!(
                "{} {}: {}",
                "✗".red().bold(),
                violation.item_name.yellow(),
                violation.description
            );
        }
        anyhow::bail!("{} stock violation(s) found", report.violations.len())
    }
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    println!("bind_addr      = {}", config.bind_addr);
    println!("token_ttl_secs = {}", config.token_ttl_secs);
    if config.has_default_secret() {
        println!(
            "token_secret   = {}",
            "placeholder (set one before exposing the API)".red()
        );
    } else {
        println!("token_secret   = {}", "(set)".green());
    }
    Ok(())
}
