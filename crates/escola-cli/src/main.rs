use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use escola_auth::hash_password;
use escola_config::{DatabaseConfig, PasswordConfig};
use escola_db::{AccountRepository, PgStore};
use escola_models::{NewAccount, RegisterAccountDto, Role};
use validator::Validate;

#[derive(Parser)]
#[command(name = "escola-cli")]
#[command(about = "Escola CLI - Administrative tools for the Escola API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create an account (any role) directly in the database
    CreateAccount {
        /// Username
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Role: aluno, professor or admin
        #[arg(short = 'r', long)]
        role: Option<Role>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let database = DatabaseConfig::from_env();
    let Some(database_url) = database.url.as_deref() else {
        bail!("DATABASE_URL must be set");
    };
    let store = PgStore::connect(database_url, database.max_connections)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => {
            store.migrate().await.context("Failed to run migrations")?;
            println!("✅ Migrations applied");
        }
        Commands::CreateAccount {
            username,
            role,
            password,
        } => handle_create_account(&store, username, role, password).await?,
    }

    Ok(())
}

async fn handle_create_account(
    store: &PgStore,
    username: Option<String>,
    role: Option<Role>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let role = match role {
        Some(role) => role,
        None => Input::<String>::new()
            .with_prompt("Role (aluno, professor, admin)")
            .interact_text()?
            .parse()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    // Same rules as the registration endpoint.
    let dto = RegisterAccountDto {
        username: username.trim().to_string(),
        password,
        role,
    };
    if let Err(errors) = dto.validate() {
        bail!("Invalid account: {}", errors);
    }

    let password_hash = hash_password(&dto.password, PasswordConfig::from_env().cost)?;
    let created = store
        .create_account(NewAccount {
            username: dto.username,
            role: dto.role,
            password_hash,
        })
        .await?;

    println!("\n✅ Account created successfully!");
    println!("   Id: {}", created.id);
    println!("   Username: {}", created.username);
    println!("   Role: {}", created.role.label());
    if let Some(number) = created.enrollment_number {
        println!("   Enrollment: {}", number);
    }

    Ok(())
}
