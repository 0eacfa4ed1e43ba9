use anyhow::{Result, bail, ensure};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use roomgraph::mapgen::{RoomGenerator, RoomRequest, first_overlap};
use roomgraph::{
    Difficulty, Direction, LayoutProvenance, MovementConstants, MovementEnvelope, ReachLimits,
    RepairPolicy, RoomType, WorldConfig, WorldGraph, validate,
};

const ROOM_TYPES: [RoomType; 7] = [
    RoomType::TransitionHub,
    RoomType::PrecisionChallenge,
    RoomType::VerticalShaft,
    RoomType::BranchingPaths,
    RoomType::BossChamber,
    RoomType::SecretArea,
    RoomType::RestArea,
];

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of standalone rooms to generate
    #[arg(short, long, default_value_t = 2000)]
    rooms: u32,
    /// Number of random transitions to attempt in a world built from the seed
    #[arg(short, long, default_value_t = 500)]
    moves: u32,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn between(rng: &mut ChaCha8Rng, low: f32, high: f32) -> f32 {
    low + (high - low) * (rng.next_u32() % 10_000) as f32 / 10_000.0
}

/// Stock constants half the time, otherwise anything from a crawl to a moon jump.
fn random_constants(rng: &mut ChaCha8Rng) -> MovementConstants {
    if rng.next_u32() % 2 == 0 {
        return MovementConstants::default();
    }
    MovementConstants {
        walk_speed: between(rng, 2.0, 8.0),
        jump_impulse: between(rng, 6.0, 30.0),
        gravity: between(rng, 0.3, 1.0),
        dash_speed: between(rng, 4.0, 20.0),
        dash_duration: between(rng, 0.5, 6.0),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    println!("Fuzzing {} rooms and {} moves on seed {}...", args.rooms, args.moves, args.seed);
    fuzz_rooms(&mut rng, args.rooms)?;
    fuzz_world(&mut rng, args.seed, args.moves)?;

    println!("Fuzzing completed successfully.");
    Ok(())
}

fn fuzz_rooms(rng: &mut ChaCha8Rng, count: u32) -> Result<()> {
    let (mut repaired, mut fallbacks) = (0_u32, 0_u32);

    for _ in 0..count {
        let constants = random_constants(rng);
        let limits = MovementEnvelope::try_new(&constants)?.reach_limits();
        let generator = RoomGenerator::new(limits, RepairPolicy::default());
        let exits: Vec<Direction> =
            Direction::ALL.into_iter().filter(|_| rng.next_u32() % 3 == 0).collect();
        let request = RoomRequest {
            room_type: choose(rng, &ROOM_TYPES),
            seed: rng.next_u64(),
            difficulty: Difficulty((rng.next_u32() % 800) as f32 / 100.0),
            exits,
        };
        let content = generator.generate(&request);

        // Invariants
        ensure!(
            validate(&content.platforms, &limits).fully_connected,
            "untraversable room for {request:?} under {constants:?}"
        );
        if let Some(pair) = first_overlap(&content.platforms) {
            bail!("platforms {pair:?} overlap for {request:?} under {constants:?}");
        }
        ensure!(
            generator.generate(&request) == content,
            "non-deterministic room for {request:?}"
        );

        match content.provenance {
            LayoutProvenance::Clean { .. } => {}
            LayoutProvenance::Repaired { .. } => repaired += 1,
            LayoutProvenance::Fallback => fallbacks += 1,
        }
    }

    println!("{count} rooms valid ({repaired} repaired, {fallbacks} fallback)");
    Ok(())
}

fn fuzz_world(rng: &mut ChaCha8Rng, seed: u64, moves: u32) -> Result<()> {
    let mut world = WorldGraph::build(&WorldConfig::with_seed(seed))?;
    let limits = ReachLimits::default();
    let mut transitions = 0_u32;

    for _ in 0..moves {
        let before = world.current_room_id();
        let direction = choose(rng, &Direction::ALL);
        let expected = world.current_room().neighbor(direction);

        match world.transition(direction) {
            Some(event) => {
                transitions += 1;
                ensure!(Some(event.to) == expected, "transition went to an unlinked room");
                ensure!(event.from == before, "transition reported the wrong origin");
                let room = world.current_room();
                ensure!(room.is_discovered(), "entered room `{}` is undiscovered", room.name);
                ensure!(
                    room.neighbor(direction.opposite()) == Some(before),
                    "no way back from `{}`",
                    room.name
                );
                ensure!(
                    validate(room.platforms(), &limits).fully_connected,
                    "room `{}` is not traversable",
                    room.name
                );
            }
            None => ensure!(
                expected.is_none() && world.current_room_id() == before,
                "transition without an exit changed the active room"
            ),
        }
    }

    let discovered = world.rooms().filter(|room| room.is_discovered()).count();
    ensure!(
        world.generation_count() == discovered,
        "generated {} rooms but discovered {discovered}",
        world.generation_count()
    );
    println!("{transitions} transitions, {discovered}/{} rooms discovered", world.room_count());
    Ok(())
}
