use argh::FromArgs;
use gameplay::log;

/// Headless raycaster over Wolfenstein 3D style maps
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// verbose level: off, error, warn, info, debug, trace
    #[argh(option)]
    pub verbose: Option<log::LevelFilter>,
    /// path to the MAPHEAD file
    #[argh(option, default = "Default::default()")]
    pub maphead: String,
    /// path to the GAMEMAPS file
    #[argh(option, default = "Default::default()")]
    pub gamemaps: String,
    /// path to an ASCII map, used instead of the archive
    #[argh(option)]
    pub ascii: Option<String>,
    /// index of the map to load from the archive
    #[argh(option, default = "0")]
    pub map: usize,
    /// list the maps in the archive and exit
    #[argh(switch)]
    pub list: bool,
    /// horizontal field of view in degrees
    #[argh(option)]
    pub fov: Option<f32>,
    /// number of rays cast per frame
    #[argh(option)]
    pub rays: Option<usize>,
    /// raycast worker threads, 1 casts on the main thread
    #[argh(option)]
    pub threads: Option<usize>,
    /// screen width in pixels
    #[argh(option, default = "0")]
    pub width: u32,
    /// screen height in pixels
    #[argh(option, default = "0")]
    pub height: u32,
    /// number of frames to run
    #[argh(option, default = "300")]
    pub frames: u64,
    /// input script to replay, one "<frames> [keys..]" step per line
    #[argh(option)]
    pub script: Option<String>,
    /// stop the player walking through walls
    #[argh(option)]
    pub clip: Option<bool>,
}
