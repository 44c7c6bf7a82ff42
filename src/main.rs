//! Wavedash headless demo driver
//!
//! Runs the bundled level under a scripted autoplay input at a fixed
//! timestep and reports the outcome. Useful as a smoke run and as an
//! example of driving the engine without any renderer attached.

use wavedash::LevelDocument;
use wavedash::consts::*;
use wavedash::level::difficulty_name;
use wavedash::sim::{Engine, Mode, Outcome, TickInput, tick};

const SIM_DT: f32 = 1.0 / 120.0;

/// How far ahead of the icon a ground hazard triggers an autoplay jump
const LOOKAHEAD: f32 = 60.0;

/// Hold the input when a lethal obstacle is closing in (or always, in wave
/// mode runs, to hug the ceiling away from ground spikes)
fn autoplay(engine: &Engine) -> bool {
    match engine.run.mode {
        Mode::Wave => true,
        Mode::Cube => engine.level().obstacles.iter().any(|ob| {
            if ob.kind.is_portal() {
                return false;
            }
            let ahead = (ob.x - engine.run.offset_x) - (engine.player.x + engine.player.w);
            (0.0..LOOKAHEAD).contains(&ahead) && ob.y + ob.h > GROUND_Y - PLAYER_SIZE
        }),
    }
}

fn main() {
    env_logger::init();

    let level = LevelDocument::bundled();
    log::info!(
        "playing {:?} ({}, length {})",
        level.name,
        difficulty_name(level.difficulty),
        level.length
    );

    let mut engine = Engine::new(level);
    while engine.run.outcome == Outcome::Running {
        let input = TickInput {
            hold: autoplay(&engine),
            ..Default::default()
        };
        tick(&mut engine, &input, SIM_DT);
    }

    match engine.run.outcome {
        Outcome::Completed => println!(
            "Level complete! Score: {}",
            engine.run.score.floor()
        ),
        Outcome::Died => println!(
            "Died at {:.0}/{:.0} with score {}",
            engine.run.offset_x,
            engine.level().length,
            engine.run.score.floor()
        ),
        Outcome::Running => unreachable!(),
    }
    println!("Best: {}", engine.run.best);
}
