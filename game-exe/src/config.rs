//! User configuration options.

use crate::{BASE_DIR, CLIOptions};
use dirs::config_dir;
use gameplay::log::{error, info, warn};
use input::config::InputConfig;
use nanoserde::{DeRon, SerRon};
use std::{
    fs::{File, create_dir_all},
    io::{Read, Write},
    path::PathBuf,
};

const LOG_TAG: &str = "UserConfig";

fn get_cfg_file() -> Option<PathBuf> {
    let Some(mut dir) = config_dir() else {
        warn!(target: LOG_TAG, "No user config dir on this system");
        return None;
    };
    dir.push(BASE_DIR);
    if let Err(e) = create_dir_all(&dir) {
        warn!(target: LOG_TAG, "Couldn't create {:?}: {}", dir, e);
        return None;
    }
    dir.push("user.ron");
    Some(dir)
}

#[derive(Debug, Clone, PartialEq, DeRon, SerRon)]
pub struct UserConfig {
    pub maphead: String,
    pub gamemaps: String,
    pub width: u32,
    pub height: u32,
    pub fov: f32,
    pub rays: usize,
    pub threads: usize,
    /// Map cells per second
    pub move_speed: f32,
    /// Radians per second
    pub rot_speed: f32,
    pub clip: bool,
    pub input: InputConfig,
}

impl Default for UserConfig {
    fn default() -> Self {
        UserConfig {
            maphead: "data/MAPHEAD.WL6".to_owned(),
            gamemaps: "data/GAMEMAPS.WL6".to_owned(),
            width: 1280,
            height: 960,
            fov: 60.0,
            rays: 320,
            threads: 4,
            move_speed: 3.0,
            rot_speed: 1.5,
            clip: true,
            input: InputConfig::default(),
        }
    }
}

impl UserConfig {
    /// Read the config file, falling back to defaults if it is missing or
    /// can't be parsed
    pub fn load() -> Self {
        let Some(path) = get_cfg_file() else {
            return UserConfig::default();
        };

        let mut buf = String::new();
        match File::open(&path).and_then(|mut f| f.read_to_string(&mut buf)) {
            Ok(0) | Err(_) => {
                info!(target: LOG_TAG, "No user config at {:?}, using defaults", path);
                UserConfig::default()
            }
            Ok(_) => match UserConfig::from_ron(&buf) {
                Some(config) => {
                    info!(target: LOG_TAG, "Loaded user config file");
                    config
                }
                None => {
                    warn!("Could not deserialise {:?} recreating config", path);
                    UserConfig::default()
                }
            },
        }
    }

    pub fn from_ron(text: &str) -> Option<Self> {
        UserConfig::deserialize_ron(text).ok()
    }

    pub fn write(&self) {
        let Some(path) = get_cfg_file() else {
            return;
        };
        let data = self.serialize_ron();
        match File::create(&path).and_then(|mut f| f.write_all(data.as_bytes())) {
            Ok(()) => info!(target: LOG_TAG, "Saved user config to {:?}", path),
            Err(err) => error!("Could not write config: {}", err),
        }
    }

    /// Sync the CLI options and UserOptions with each other
    pub fn sync_cli(&mut self, cli: &mut CLIOptions) {
        info!("Checking CLI options");

        if !cli.maphead.is_empty() && cli.maphead != self.maphead {
            cli.maphead.clone_into(&mut self.maphead);
            info!("MAPHEAD changed to: {}", &cli.maphead);
        } else {
            self.maphead.clone_into(&mut cli.maphead);
        }

        if !cli.gamemaps.is_empty() && cli.gamemaps != self.gamemaps {
            cli.gamemaps.clone_into(&mut self.gamemaps);
            info!("GAMEMAPS changed to: {}", &cli.gamemaps);
        } else {
            self.gamemaps.clone_into(&mut cli.gamemaps);
        }

        if cli.width != 0 && cli.width != self.width {
            self.width = cli.width;
        } else {
            cli.width = self.width;
        }

        if cli.height != 0 && cli.height != self.height {
            self.height = cli.height;
        } else {
            cli.height = self.height;
        }

        if let Some(fov) = cli.fov {
            self.fov = fov;
        } else {
            cli.fov = Some(self.fov);
        }

        if let Some(rays) = cli.rays {
            self.rays = rays;
        } else {
            cli.rays = Some(self.rays);
        }

        if let Some(threads) = cli.threads {
            self.threads = threads;
        } else {
            cli.threads = Some(self.threads);
        }

        if let Some(clip) = cli.clip {
            self.clip = clip;
        } else {
            cli.clip = Some(self.clip);
        }
    }
}
