//! Performance benchmarks for critical game systems

use rand::rngs::StdRng;
use rand::SeedableRng;
use server::player_registry::PlayerRegistry;
use shared::{choose_free_cell, Direction, Food, Grid, Occupancy, Position, ServerMessage, Snake};
use std::time::Instant;

/// Benchmarks snake movement with wrapping and self-collision checks
#[test]
fn benchmark_snake_ticks() {
    let grid = Grid::default();
    let body: Vec<Position> = (0..40).map(|x| Position::new(40 - x, 10)).collect();
    let mut snake = Snake::with_body("bench", body, Direction::Right, grid).unwrap();

    let iterations = 100_000;
    let start = Instant::now();

    for i in 0..iterations {
        snake.tick(i as u64 * 1_000);
    }

    let duration = start.elapsed();
    println!(
        "Snake ticks: {} ticks with {} segments in {:?} ({:.2} ns/tick)",
        iterations,
        snake.len(),
        duration,
        duration.as_nanos() as f64 / iterations as f64
    );

    // A straight snake on a wrapping row never hits itself
    assert!(snake.is_alive());
    // Should complete in under 1 second
    assert!(duration.as_millis() < 1000);
}

/// Benchmarks food placement on a nearly full board
#[test]
fn benchmark_food_placement_near_full_grid() {
    let grid = Grid::default();
    let mut occupancy = Occupancy::new(grid);
    for cell in grid.cells().skip(1) {
        occupancy.mark(cell);
    }

    let mut rng = StdRng::seed_from_u64(11);
    let iterations = 1_000;
    let start = Instant::now();

    for _ in 0..iterations {
        let cell = choose_free_cell(&occupancy, &mut rng).unwrap();
        assert_eq!(cell, Position::new(0, 0));
    }

    let duration = start.elapsed();
    println!(
        "Food placement: {} placements on {} cells in {:?} ({:.2} μs/placement)",
        iterations,
        grid.cell_count(),
        duration,
        duration.as_micros() as f64 / iterations as f64
    );

    // Should complete in under 1 second
    assert!(duration.as_millis() < 1000);
}

/// Benchmarks eating and growing for a long run
#[test]
fn benchmark_growth_run() {
    // One long row so the growing snake never reaches its own tail
    let grid = Grid::new(1_000, 1);
    let mut snake = Snake::new("bench", Position::new(0, 0), grid);
    let mut food = Food::new(grid.step(snake.head(), Direction::Right));
    let mut now = 0;

    let iterations = 500;
    let start = Instant::now();

    for _ in 0..iterations {
        snake.tick(now);
        now += snake.speed_ms();
        if snake.collide_with_food(&mut food) {
            food.position = grid.step(snake.head(), Direction::Right);
        }
    }

    let duration = start.elapsed();
    println!(
        "Growth run: {} meals in {:?}, final length {}, speed {} ms",
        food.total_consumed,
        duration,
        snake.len(),
        snake.speed_ms()
    );

    assert_eq!(food.total_consumed, iterations);
    assert_eq!(snake.speed_ms(), shared::MIN_SPEED_MS);
    // Should complete in under 1 second
    assert!(duration.as_millis() < 1000);
}

/// Benchmarks the registry snapshot sent to every joining player
#[test]
fn benchmark_registry_snapshot() {
    let mut registry = PlayerRegistry::new(Grid::default());
    let mut rng = StdRng::seed_from_u64(5);
    for i in 0..200 {
        registry.add_player(&format!("player-{}", i), &mut rng);
    }

    let iterations = 200;
    let start = Instant::now();

    for _ in 0..iterations {
        let message = ServerMessage::CurrentPlayers(registry.snapshot());
        let _json = message.to_json().unwrap();
    }

    let duration = start.elapsed();
    println!(
        "Registry snapshot: {} players × {} snapshots in {:?} ({:.2} μs/snapshot)",
        registry.len(),
        iterations,
        duration,
        duration.as_micros() as f64 / iterations as f64
    );

    // Should complete in under 2 seconds
    assert!(duration.as_millis() < 2000);
}

/// Stress tests movement updates under high load
#[test]
fn stress_test_many_movement_updates() {
    let grid = Grid::default();
    let mut registry = PlayerRegistry::new(grid);
    let mut rng = StdRng::seed_from_u64(6);
    let ids: Vec<String> = (0..50).map(|i| format!("player-{}", i)).collect();
    for id in &ids {
        registry.add_player(id, &mut rng);
    }

    let iterations = 100_000;
    let start = Instant::now();

    for i in 0..iterations {
        let id = &ids[i % ids.len()];
        let position = grid.wrap(Position::new(i as i32, (i / 7) as i32));
        assert!(registry.update_position(id, position));
    }

    let duration = start.elapsed();
    println!(
        "Movement updates: {} updates in {:?}",
        iterations,
        duration
    );

    // Should complete in under 1 second
    assert!(duration.as_millis() < 1000);
}
