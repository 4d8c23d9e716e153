/// Lathe Server - WAV mastering service
use clap::{Parser, Subcommand};
use lathe_mastering::{MasteringChain, MasteringParams};
use lathe_server::{config::ServerConfig, create_router, state::AppState};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lathe-server")]
#[command(about = "Loudness mastering service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Master a local WAV file without going through HTTP
    Master {
        /// Input WAV path
        input: PathBuf,
        /// Output WAV path
        output: PathBuf,
        /// Target integrated loudness in LUFS
        #[arg(long)]
        target_lufs: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lathe_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            serve().await?;
        }
        Commands::Master {
            input,
            output,
            target_lufs,
        } => {
            master_file(&input, &output, target_lufs)?;
        }
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Lathe Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!(
        "Default target loudness: {} LUFS",
        config.mastering.target_lufs
    );

    let app_state = AppState::new(config.mastering.to_params());
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn master_file(input: &Path, output: &Path, target_lufs: Option<f64>) -> anyhow::Result<()> {
    let params = match target_lufs {
        Some(target) => MasteringParams::with_target_lufs(target),
        None => MasteringParams::default(),
    };

    let bytes = std::fs::read(input)?;
    let raw = lathe_codec::decode_wav(&bytes)?;
    tracing::info!(
        frames = raw.frames(),
        sample_rate = raw.sample_rate,
        channels = raw.channels,
        "decoded {}",
        input.display()
    );

    let mastered = MasteringChain::new(params).master(raw)?;
    let wav = lathe_codec::encode_wav_pcm16(&mastered)?;
    std::fs::write(output, wav)?;

    tracing::info!("wrote mastered audio to {}", output.display());
    Ok(())
}
