use anyhow::{Context, bail};
use bims_cli::{create_user, issue_token};
use bims_config::{JwtConfig, StoreConfig};
use bims_db::{PgUserStore, init_db_pool};
use bims_models::{CreateUserDto, UserId, UserRole};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "bims-cli")]
#[command(about = "BIMS CLI - Administrative tools for the BIMS API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    CreateUser {
        /// First name
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// client, broker or admin
        #[arg(short = 'r', long, default_value = "client")]
        role: UserRole,
    },
    /// Print an access token for an existing user
    IssueToken {
        /// User id (UUID)
        #[arg(short = 'u', long)]
        user_id: UserId,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let StoreConfig::Postgres {
        database_url,
        max_connections,
        ..
    } = StoreConfig::from_env()?
    else {
        bail!("bims-cli needs a PostgreSQL store; unset BIMS_STORE or set it to 'postgres'");
    };
    let pool = init_db_pool(&database_url, max_connections)
        .await
        .context("Failed to connect to database")?;
    let users = PgUserStore::new(pool);

    match cli.command {
        Commands::CreateUser {
            first_name,
            last_name,
            email,
            password,
            role,
        } => {
            let dto = CreateUserDto {
                first_name: prompt_unless_set(first_name, "First name")?,
                last_name: prompt_unless_set(last_name, "Last name")?,
                email: prompt_unless_set(email, "Email address")?,
                password: match password {
                    Some(password) => password,
                    None => Password::new()
                        .with_prompt("Password")
                        .with_confirmation("Confirm password", "Passwords don't match")
                        .interact()?,
                },
                role: Some(role),
            };

            let user = create_user(&users, dto).await?;
            println!("\n✅ User created successfully!");
            println!("   Id: {}", user.id);
            println!("   Email: {}", user.email);
            println!("   Name: {} {}", user.first_name, user.last_name);
            println!("   Role: {}", user.role);
        }
        Commands::IssueToken { user_id } => {
            let jwt_config = JwtConfig::from_env()?;
            let token = issue_token(&users, user_id, &jwt_config).await?;
            println!("{token}");
        }
    }

    Ok(())
}

fn prompt_unless_set(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}
