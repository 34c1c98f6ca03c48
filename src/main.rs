//! Gem Dash headless runner
//!
//! Loads a level directory and drives the simulation with a scripted input
//! track at a steady 60 fps, logging every game event.
//!
//! Usage: `gem-dash <level-dir> [seconds] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use gem_dash::sim::{FrameClock, GameEvent, GamePhase, World};
    use gem_dash::{Level, LevelError, Tuning};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const DEFAULT_SECONDS: f32 = 30.0;

    pub struct Args {
        pub level_dir: PathBuf,
        pub seconds: f32,
        pub tuning: Option<PathBuf>,
    }

    impl Args {
        pub fn parse() -> Option<Self> {
            let mut args = std::env::args().skip(1);
            let level_dir = PathBuf::from(args.next()?);
            let seconds = match args.next() {
                Some(s) => s.parse().ok().filter(|s: &f32| s.is_finite() && *s > 0.0)?,
                None => DEFAULT_SECONDS,
            };
            let tuning = args.next().map(PathBuf::from);
            Some(Self {
                level_dir,
                seconds,
                tuning,
            })
        }
    }

    /// Run right most of the time, hop regularly, throw now and then
    fn script(clock: &mut FrameClock, time: f32, frame: u64) {
        clock.input.move_axis = if time % 4.0 < 3.0 { 1.0 } else { -1.0 };
        if frame % 90 == 0 {
            clock.input.jump = true;
        }
        if frame % 150 == 75 {
            clock.input.throw = true;
        }
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning, LevelError> {
        match path {
            Some(p) => Ok(Tuning::from_json(&std::fs::read_to_string(p)?)?),
            None => Ok(Tuning::default()),
        }
    }

    pub fn run(args: &Args) -> Result<(), LevelError> {
        let tuning = load_tuning(args.tuning.as_ref())?;
        let level = Level::load_dir(&args.level_dir)?;
        let mut world = World::new(&level, tuning);
        let mut clock = FrameClock::new();

        let frames = (args.seconds / FRAME_DT).ceil() as u64;
        let mut events = 0usize;
        for frame in 0..frames {
            let time = frame as f32 * FRAME_DT;
            script(&mut clock, time, frame);
            clock.advance(&mut world, FRAME_DT);

            for event in &world.events {
                events += 1;
                match event {
                    GameEvent::Won | GameEvent::GameOver => log::info!("[{:7.2}s] {:?}", time, event),
                    _ => log::debug!("[{:7.2}s] {:?}", time, event),
                }
            }
            if world.phase.is_terminal() {
                break;
            }
        }

        let snap = world.snapshot();
        println!("Phase:       {:?}", snap.phase);
        println!("Ticks:       {}", world.time_ticks);
        println!("Score:       {} ({} gems left)", snap.score, snap.gems_remaining);
        println!("Hearts:      {}/{}", world.hearts.full_count(), world.hearts.total());
        println!("Enemies:     {}", world.enemies.len());
        println!("Events:      {}", events);
        println!("Player:      ({:.1}, {:.1})", world.player.pos().x, world.player.pos().y);
        println!("Camera:      ({:.1}, {:.1})", snap.camera_offset.x, snap.camera_offset.y);
        if snap.phase == GamePhase::Playing {
            println!("(time limit reached)");
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gem Dash (native) starting...");

    let Some(args) = native::Args::parse() else {
        eprintln!("Usage: gem-dash <level-dir> [seconds] [tuning.json]");
        std::process::exit(2);
    };

    if let Err(e) = native::run(&args) {
        eprintln!("Failed to run level {}: {}", args.level_dir.display(), e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by a host page on the web; nothing to run here
}
