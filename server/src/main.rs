use clap::Parser;
use log::info;
use server::network::{Server, ServerConfig};
use shared::Position;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Column of the initial food cell (random if omitted)
    #[arg(long, requires = "food_y")]
    food_x: Option<i32>,

    /// Row of the initial food cell (random if omitted)
    #[arg(long, requires = "food_x")]
    food_y: Option<i32>,

    /// Seed for spawn positions and initial food placement
    #[arg(short, long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    let initial_food = match (args.food_x, args.food_y) {
        (Some(x), Some(y)) => Some(Position::new(x, y)),
        _ => None,
    };

    let config = ServerConfig {
        addr: format!("{}:{}", args.host, args.port),
        seed: args.seed,
        initial_food,
    };

    let server = Server::bind(config).await?;
    info!("Server ready at ws://{}", server.local_addr()?);

    tokio::select! {
        _ = server.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
