#![doc = include_str!("../../README.md")]

mod cli;
mod config;
mod scene;
mod sink;
mod timestep;

use cli::*;
use mimalloc::MiMalloc;
use simplelog::TermLogger;
use std::error::Error;
use std::fs;

use gamemaps::{MapArchive, RawMap};
use gameplay::log;
use input::config::InputBindings;
use input::{Input, ScriptedInput};
use render_trait::BufferSize;

use crate::config::UserConfig;
use crate::log::{debug, info};
use crate::scene::{Scene, SceneOptions};
use crate::sink::FrameSummary;
use crate::timestep::TimeStep;

const BASE_DIR: &str = "wolf-rays/";

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// The main `game-exe` crate should take care of initialising a few things
fn main() -> Result<(), Box<dyn Error>> {
    let mut options: CLIOptions = argh::from_env();

    TermLogger::init(
        options.verbose.unwrap_or(log::LevelFilter::Info),
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut user_config = UserConfig::load();
    user_config.sync_cli(&mut options);
    user_config.write();

    if options.list {
        let archive = MapArchive::open(&options.maphead, &options.gamemaps)?;
        for (i, name) in archive.map_names().iter().enumerate() {
            println!("{i:3}: {name}");
        }
        return Ok(());
    }

    let map = load_map(&options)?;
    let bindings = InputBindings::try_from(&user_config.input)?;
    let script = match &options.script {
        Some(path) => Some(ScriptedInput::parse(&fs::read_to_string(path)?)?),
        None => None,
    };

    let scene_options = SceneOptions {
        fov_deg: options.fov.unwrap_or(user_config.fov),
        rays: options.rays.unwrap_or(user_config.rays),
        threads: options.threads.unwrap_or(user_config.threads),
        size: BufferSize::new(options.width as usize, options.height as usize),
        move_speed: user_config.move_speed,
        rot_speed: user_config.rot_speed,
        clip: options.clip.unwrap_or(user_config.clip),
    };
    let mut scene = Scene::new(map, &scene_options, Input::new(bindings), script)?;

    run_frames(&mut scene, options.frames)?;
    #[cfg(feature = "hprof")]
    coarse_prof::write(&mut std::io::stdout())?;
    Ok(())
}

fn load_map(options: &CLIOptions) -> Result<RawMap, gamemaps::MapError> {
    if let Some(path) = &options.ascii {
        info!("Loading ASCII map {path}");
        return RawMap::load_ascii(path);
    }
    let archive = MapArchive::open(&options.maphead, &options.gamemaps)?;
    archive.load_map(options.map)
}

fn run_frames(scene: &mut Scene, frames: u64) -> Result<(), Box<dyn Error>> {
    let mut timestep = TimeStep::new();
    let mut summary = FrameSummary::default();

    while timestep.total_frames() < frames {
        timestep.run_this(|dt| scene.update(dt));
        summary.reset();
        scene.draw(&mut summary)?;
        debug!(
            "frame {}: {} columns covering {}px, tallest {:.1}",
            timestep.total_frames(),
            summary.columns,
            summary.covered,
            summary.tallest
        );

        if let Some(fps) = timestep.frame_rate() {
            info!("{fps}");
        }
    }
    let player = scene.player();
    info!(
        "Ran {} frames, player at {:?} facing {:.1}°",
        timestep.total_frames(),
        player.pos(),
        player.orientation().to_degrees()
    );
    Ok(())
}
