//! Drives a `PoolRegistry` from a simulated frame loop:
//!
//! * Creating pools up front via the builder.
//! * Spawning effects at positions as they are requested.
//! * Recycling effects once their lifetime has passed.
//! * Skipping spawns gracefully when a pool runs dry.

use std::collections::VecDeque;
use std::num::NonZero;

use prototype_pool::fake::FakeHost;
use prototype_pool::{PoolRegistry, Vec3};

const SPARK: &str = "spark";
const SMOKE: &str = "smoke";

const FRAMES: u16 = 30;
const EFFECT_LIFETIME_FRAMES: u16 = 4;

fn main() {
    // Sparks may grow on demand; smoke is capped so a busy scene cannot flood the screen.
    let mut registry = PoolRegistry::<FakeHost>::builder()
        .default_size(NonZero::new(3).unwrap())
        .prototype_to_pool(SPARK)
        .build(FakeHost::new())
        .expect("every prototype of the fake host can be pooled");

    let mut capped = PoolRegistry::<FakeHost>::builder()
        .dynamic_extend(false)
        .build(FakeHost::new())
        .expect("building without prototypes cannot fail");
    capped
        .create_pool(SMOKE, 2)
        .expect("pool size is not zero");

    let mut live_sparks = VecDeque::new();
    let mut live_smoke = VecDeque::new();
    let mut skipped_smoke = 0_u32;
    let mut spark_due = true;

    for frame in 0..FRAMES {
        let x = f32::from(frame);

        // Sparks spawn every other frame.
        if spark_due {
            let spark = registry
                .get_placed(&SPARK, Vec3::new(x, 1.0, 0.0))
                .expect("spark pool extends on demand");
            live_sparks.push_back((frame, spark));
        }
        spark_due = !spark_due;

        match capped.get_placed(&SMOKE, Vec3::new(x, 0.0, 0.0)) {
            Ok(smoke) => live_smoke.push_back((frame, smoke)),
            Err(error) => {
                skipped_smoke = skipped_smoke
                    .checked_add(1)
                    .expect("the loop runs far fewer frames than u32::MAX");
                println!("frame {frame}: no smoke this time ({error})");
            }
        }

        // Recycle everything that has been alive long enough.
        while live_sparks
            .front()
            .is_some_and(|(spawned, _)| {
                frame.saturating_sub(*spawned) >= EFFECT_LIFETIME_FRAMES
            })
        {
            let (_, spark) = live_sparks.pop_front().expect("we just checked the front");
            registry.release(spark).expect("spark came from this registry");
        }

        while live_smoke
            .front()
            .is_some_and(|(spawned, _)| {
                frame.saturating_sub(*spawned) >= EFFECT_LIFETIME_FRAMES
            })
        {
            let (_, smoke) = live_smoke.pop_front().expect("we just checked the front");
            capped.release(smoke).expect("smoke came from this registry");
        }
    }

    println!(
        "sparks: {} created, {} waiting",
        registry.created(&SPARK).unwrap_or_default(),
        registry.available(&SPARK).unwrap_or_default()
    );
    println!(
        "smoke: {} created, {} skipped spawns",
        capped.created(&SMOKE).unwrap_or_default(),
        skipped_smoke
    );
}
