//! User Service - command-line front end over the in-memory store.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

use common::ErrorResponse;
use domain::{CreateUser, DomainError, DomainResult, ListOptions, UpdateUser};
use user_service_lib::config::UserServiceConfig;
use user_service_lib::service::{UserManager, UserService};

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User management core")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List users page by page
    List {
        #[arg(long)]
        page: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Search users by name or email
    Search {
        query: String,
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Show one user by ID or email
    Show { key: String },
    /// List users created within a date range (RFC 3339)
    Created {
        #[arg(long)]
        from: Option<DateTime<Utc>>,
        #[arg(long)]
        to: Option<DateTime<Utc>>,
    },
    /// Print user statistics
    Stats,
    /// Walk one user through create, update, deactivate and delete
    Demo {
        #[arg(long, default_value = "jo.li@example.com")]
        email: String,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(service: &UserManager, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::List {
            page,
            limit,
            search,
        } => {
            let options = ListOptions {
                page,
                limit,
                search,
            };
            print_json(&service.list_users(Some(options)).await?)?;
        }
        Commands::Search { query, limit } => {
            print_json(&service.search_users(&query, limit).await?)?;
        }
        Commands::Show { key } => {
            let user = if key.contains('@') {
                service.get_user_by_email(&key).await?
            } else {
                service.get_user(&key).await?
            };
            match user {
                Some(user) => print_json(&user)?,
                None => println!("No user matches '{}'", key),
            }
        }
        Commands::Created { from, to } => {
            print_json(&service.users_created_between(from, to).await?)?;
        }
        Commands::Stats => {
            print_json(&service.get_user_stats().await?)?;
        }
        Commands::Demo { email } => demo(service, email).await?,
    }

    Ok(())
}

/// Show each lifecycle step, including the transitions that must be refused.
async fn demo(service: &UserManager, email: String) -> Result<(), Box<dyn std::error::Error>> {
    let created = service
        .create_user(CreateUser::new(email.clone(), "Jo", "Li"))
        .await?;
    println!("created:");
    print_json(&created)?;

    report("create again", service.create_user(CreateUser::new(email, "Jo", "Li")).await)?;
    report(
        "permanent delete while active",
        service.delete_user_permanently(&created.id).await,
    )?;

    let update = UpdateUser {
        first_name: Some("Joanna".to_string()),
        last_name: None,
    };
    report("update", service.update_user(&created.id, update.clone()).await)?;
    report("deactivate", service.deactivate_user(&created.id).await)?;
    report("deactivate again", service.deactivate_user(&created.id).await)?;
    report("update while inactive", service.update_user(&created.id, update).await)?;
    report("permanent delete", service.delete_user_permanently(&created.id).await)?;
    report("lookup after delete", service.get_user(&created.id).await)?;

    Ok(())
}

fn report<T: Serialize>(step: &str, result: DomainResult<T>) -> Result<(), serde_json::Error> {
    println!("{}:", step);
    match result {
        Ok(value) => print_json(&value),
        Err(err) => print_json(&ErrorResponse::from(err)),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = UserServiceConfig::from_env()?;
    common::init_tracing(&config.service);

    let cli = Cli::parse();
    let service = user_service_lib::in_memory_service(&config)?;

    if let Err(err) = run(&service, cli.command).await {
        match err.downcast::<DomainError>() {
            Ok(domain_err) => {
                eprintln!("{}", serde_json::to_string_pretty(&ErrorResponse::from(*domain_err))?);
                std::process::exit(1);
            }
            Err(other) => return Err(other),
        }
    }

    Ok(())
}
