use clap::Parser;
use client::game::ClientGameState;
use client::input::poll_direction;
use client::network::spawn_network_thread;
use client::rendering::Renderer;
use log::info;
use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;
use shared::{Grid, CELL_SIZE, GRID_HEIGHT, GRID_WIDTH};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// WebSocket URL of the server
    #[arg(short = 's', long, default_value = "ws://127.0.0.1:3000")]
    server: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Grid Snake".to_owned(),
        window_width: GRID_WIDTH * CELL_SIZE as i32,
        window_height: GRID_HEIGHT * CELL_SIZE as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    info!("Starting client...");
    info!("Controls: arrow keys or WASD to steer, Esc to quit");

    let mut network = spawn_network_thread(args.server);
    let mut game = ClientGameState::new(Grid::default(), StdRng::from_entropy());
    let renderer = Renderer::new(CELL_SIZE as f32);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        for message in network.drain() {
            game.apply_server_message(message);
        }

        let now_ms = (get_time() * 1000.0) as u64;
        for message in game.update(now_ms, poll_direction()) {
            network.send(message);
        }

        renderer.render(&game);
        next_frame().await;
    }

    info!("Client exiting");
}
