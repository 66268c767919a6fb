//! CLI administration tool for user-groups.
//!
//! Inspects and manages users and groups directly against the database,
//! going through the same services as the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List users with their groups
//! cargo run --bin admin -- user list
//!
//! # Find the first user with a given first name
//! cargo run --bin admin -- user find Alice
//!
//! # Delete a user (asks for confirmation)
//! cargo run --bin admin -- user delete 42
//!
//! # Create a group
//! cargo run --bin admin -- group create Engineers
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` or the `DB_*` components.

use user_groups::api::dto::GroupRequest;
use user_groups::api::validation;
use user_groups::config;
use user_groups::domain::entities::{Group, NewGroup, User};
use user_groups::error::AppError;
use user_groups::i18n::{Locale, render_errors};
use user_groups::server;
use user_groups::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing user-groups.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage groups
    Group {
        #[command(subcommand)]
        action: GroupAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all users
    List,

    /// Show the first user with the given first name
    Find {
        /// First name, matched exactly
        name: String,
    },

    /// Show a user by ID
    Show { id: i64 },

    /// Delete a user
    Delete {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum GroupAction {
    /// List all groups
    List,

    /// Create a group
    Create { name: String },

    /// Delete a group; its members are kept
    Delete {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = server::connect(&config).await?;
    let state = AppState::from_pool(Arc::new(pool.clone()), config.default_locale);

    match cli.command {
        Commands::User { action } => handle_user_action(action, &state).await?,
        Commands::Group { action } => handle_group_action(action, &state).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Turns a service error into a readable CLI error.
fn cli_error(e: AppError) -> anyhow::Error {
    match e {
        AppError::Validation(errors) => {
            let lines: Vec<String> = render_errors(&errors, Locale::En)
                .into_values()
                .flatten()
                .collect();
            anyhow::anyhow!(lines.join(" "))
        }
        AppError::NotFound(message) => anyhow::anyhow!(message.text(Locale::En)),
        AppError::Internal(detail) => anyhow::anyhow!("Database error: {}", detail),
    }
}

async fn handle_user_action(action: UserAction, state: &AppState) -> Result<()> {
    let users = &state.user_service;

    match action {
        UserAction::List => {
            println!("{}", "👥 Users".bright_blue().bold());
            println!();

            let list = users.list_users().await.map_err(cli_error)?;
            if list.is_empty() {
                println!("{}", "  No users found".yellow());
                return Ok(());
            }

            println!(
                "  {:<5} {:<20} {:<20} {:<12} {}",
                "ID".bright_white().bold(),
                "First name".bright_white().bold(),
                "Last name".bright_white().bold(),
                "State".bright_white().bold(),
                "Groups".bright_white().bold()
            );
            println!("  {}", "─".repeat(75).bright_black());

            for user in &list {
                let groups: Vec<&str> = user.groups.iter().map(|g| g.name.as_str()).collect();
                println!(
                    "  {:<5} {:<20} {:<20} {:<12} {}",
                    user.id.to_string().bright_black(),
                    user.first_name.cyan(),
                    user.last_name.as_deref().unwrap_or("-"),
                    state_label(&user.state),
                    groups.join(", ")
                );
            }

            println!();
            println!("  Total: {}", list.len().to_string().bright_white().bold());
        }
        UserAction::Find { name } => {
            let user = users
                .find_user_by_name(&name)
                .await
                .map_err(cli_error)?
                .with_context(|| format!("No user named '{}'", name))?;
            print_user(&user);
        }
        UserAction::Show { id } => {
            let user = users.get_user(id).await.map_err(cli_error)?;
            print_user(&user);
        }
        UserAction::Delete { id, yes } => {
            let user = users.get_user(id).await.map_err(cli_error)?;
            print_user(&user);

            if !yes && !confirm("Delete this user?")? {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }

            users.delete_user(&user).await.map_err(cli_error)?;
            println!("{}", "✅ User deleted".green().bold());
        }
    }

    Ok(())
}

async fn handle_group_action(action: GroupAction, state: &AppState) -> Result<()> {
    let groups = &state.group_service;

    match action {
        GroupAction::List => {
            println!("{}", "📋 Groups".bright_blue().bold());
            println!();

            let list = groups.list_groups().await.map_err(cli_error)?;
            if list.is_empty() {
                println!("{}", "  No groups found".yellow());
                return Ok(());
            }

            println!(
                "  {:<5} {:<30} {}",
                "ID".bright_white().bold(),
                "Name".bright_white().bold(),
                "Members".bright_white().bold()
            );
            println!("  {}", "─".repeat(50).bright_black());

            for group in &list {
                println!(
                    "  {:<5} {:<30} {}",
                    group.id.to_string().bright_black(),
                    group.name.cyan(),
                    group.users.len()
                );
            }

            println!();
            println!("  Total: {}", list.len().to_string().bright_white().bold());
        }
        GroupAction::Create { name } => {
            let name = Some(name.trim().to_string()).filter(|n| !n.is_empty());
            let name = validation::group_name(GroupRequest { name }).map_err(cli_error)?;
            let group = groups
                .create_group(NewGroup { name })
                .await
                .map_err(cli_error)?;
            println!(
                "{} {} (ID {})",
                "✅ Group created:".green().bold(),
                group.name.cyan(),
                group.id
            );
        }
        GroupAction::Delete { id, yes } => {
            let group = groups.get_group(id).await.map_err(cli_error)?;
            print_group(&group);

            if !yes && !confirm("Delete this group? Its members are kept.")? {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }

            groups.delete_group(&group).await.map_err(cli_error)?;
            println!("{}", "✅ Group deleted".green().bold());
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await?;
            let groups: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM groups")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Users:      {}", users.to_string().bright_green().bold());
            println!("  Groups:     {}", groups.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

fn state_label(state: &str) -> ColoredString {
    if state == "active" {
        state.green()
    } else {
        state.yellow()
    }
}

fn print_user(user: &User) {
    println!("  ID:         {}", user.id.to_string().bright_black());
    println!("  First name: {}", user.first_name.cyan());
    println!("  Last name:  {}", user.last_name.as_deref().unwrap_or("-"));
    println!("  Email:      {}", user.email);
    println!("  State:      {}", state_label(&user.state));
    println!(
        "  Created:    {}",
        user.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
    if user.groups.is_empty() {
        println!("  Groups:     -");
    } else {
        for group in &user.groups {
            println!("  Group:      {} (ID {})", group.name.cyan(), group.id);
        }
    }
    println!();
}

fn print_group(group: &Group) {
    println!("  ID:      {}", group.id.to_string().bright_black());
    println!("  Name:    {}", group.name.cyan());
    println!("  Members: {}", group.users.len());
    println!();
}
