// Tick and timing
pub const TICKS_PER_SECOND: u32 = 60;
pub const REALTIME_FRAME_MS: u64 = 16; // redraw cadence, ~60 FPS
pub const INPUT_POLL_MS: u64 = 4;
pub const MAX_CATCHUP_TICKS: u32 = 5;

// Scene defaults (points, y-up, origin bottom-left)
pub const SCENE_WIDTH: f64 = 288.0;
pub const SCENE_HEIGHT: f64 = 512.0;
pub const FLOOR_WIDTH: f64 = 336.0;
pub const FLOOR_HEIGHT: f64 = 112.0;
pub const BIRD_WIDTH: f64 = 34.0;
pub const BIRD_HEIGHT: f64 = 24.0;
pub const PIPE_WIDTH: f64 = 60.0;

// Physics defaults
pub const GRAVITY: f64 = -750.0; // -5 m/s² at 150 points per meter
pub const FLAP_IMPULSE: f64 = 200.0;
pub const MAX_RISE_SPEED: f64 = 200.0;
pub const MAX_FALL_SPEED: f64 = 600.0;
pub const SCROLL_SPEED: f64 = 1.0; // points per tick

// Pipe gap bounds, in bird heights
pub const PIPE_GAP_MIN_FACTOR: f64 = 2.5;
pub const PIPE_GAP_RANGE_FACTOR: f64 = 1.0;

// Scheduled actions
pub const SPAWN_WAIT_SECONDS: f64 = 3.5;
pub const SPAWN_WAIT_RANGE_SECONDS: f64 = 1.5;
pub const FLY_FRAME_SECONDS: f64 = 0.15;
pub const BANNER_SLIDE_SECONDS: f64 = 0.5;

// Save system
pub const RECORDS_VERSION_MAGIC: u64 = 0x464C415050593031; // "FLAPPY01"
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "flappy.log";
