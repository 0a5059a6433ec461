/// Keepsake Server - personal media portal
use clap::{Parser, Subcommand};
use keepsake_core::{Library, NewAccount};
use keepsake_media::MediaService;
use keepsake_server::{api, AppState, AuthService, Backends, ServerConfig};
use std::{net::SocketAddr, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "keepsake-server")]
#[command(about = "Keepsake personal media portal", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml)
    #[arg(short, long, global = true, env = "KEEPSAKE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print a bcrypt hash for auth.app_password_hash
    HashPassword {
        /// Password to hash
        password: String,
    },
    /// Create a login account
    AddAccount {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// List the folders of a library
    ListFolders {
        /// photos, songs or diary_media
        library: Library,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keepsake_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Serve => {
            serve(ServerConfig::load(config_path)?).await?;
        }
        Commands::HashPassword { password } => {
            let hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)?;
            println!("{hash}");
        }
        Commands::AddAccount {
            email,
            username,
            password,
        } => {
            add_account(ServerConfig::load(config_path)?, email, username, &password).await?;
        }
        Commands::ListFolders { library } => {
            list_folders(ServerConfig::load(config_path)?, library).await?;
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Keepsake Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    if config.auth.app_password_hash.is_none() {
        tracing::warn!("No app password configured, only account logins will succeed");
    }
    if config.basic_credentials().is_some() {
        tracing::info!("HTTP Basic gate enabled");
    }

    let backends = Backends::from_config(&config).await?;
    let app_state = AppState::new(&config, backends);
    let app = api::router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_account(
    config: ServerConfig,
    email: String,
    username: String,
    password: &str,
) -> anyhow::Result<()> {
    let backends = Backends::from_config(&config).await?;
    let auth_service = AuthService::new(config.auth.session_secret.clone(), 1, None);

    let account = backends
        .accounts
        .create_account(NewAccount {
            email,
            username,
            password_hash: auth_service.hash_password(password)?,
        })
        .await?;

    println!("Created account {} <{}>", account.username, account.email);
    Ok(())
}

async fn list_folders(config: ServerConfig, library: Library) -> anyhow::Result<()> {
    let backends = Backends::from_config(&config).await?;
    let media = MediaService::new(backends.objects, backends.favorites, config.media_config());

    println!("Folders in {library}:");
    for folder in media.folders(library).await {
        println!("  {folder}");
    }
    Ok(())
}
