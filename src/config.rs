// All tunable idle-screen constants in one place.

// Viewport
pub const DEFAULT_CANVAS_W: u32 = 800;
pub const DEFAULT_CANVAS_H: u32 = 600;
pub const CONTENT_ASPECT: f64 = 4.0 / 3.0;
pub const MIN_WINDOW_W: f32 = 640.0;
pub const MIN_WINDOW_H: f32 = 480.0;

// Object
pub const DEFAULT_BALL_SIZE: u32 = 36;
pub const DEFAULT_BASE_SPEED: f64 = 5.0;
pub const MIN_BASE_SPEED: f64 = 1.0;
pub const MAX_BASE_SPEED: f64 = 24.0;
pub const START_X_FRACTION: f64 = 0.25;
pub const START_Y_FRACTION: f64 = 0.4;
pub const START_ANGLE_SPREAD: f64 = 0.9;
pub const START_MIN_COMPONENT: f64 = 0.2;

// Motion
pub const FRAME_RATE: f64 = 60.0;
pub const FALLBACK_DT: f64 = 1.0 / FRAME_RATE;
pub const MAX_DT: f64 = 0.5;
pub const SPEED_BOOST_FRAMES: u32 = 12;
pub const SPEED_BOOST_MULT: f64 = 1.45;
pub const JITTER_RANGE: f64 = 0.35;
pub const JITTER_SCALE: f64 = 0.25;
pub const COLLISION_PHRASES: [&str; 5] = ["BOOM!", "CLANK!", "TOK!", "BAM!", "DING!"];

// Day / night
pub const SILENT_START: u32 = 22;
pub const SILENT_END: u32 = 6;
pub const SILENT_SPEED_DIV: f64 = 2.0;
pub const NIGHT_DIM_START: u32 = 18;
pub const NIGHT_DIM_FACTOR: f64 = 0.55;

// Trail
pub const TRAIL_MAX: usize = 30;
pub const TRAIL_MAX_INTERPOLANTS: usize = 12;
pub const TRAIL_MID_TINT: f64 = 1.35;
pub const TRAIL_HEAD_TINT: f64 = 1.5;

// Clock
pub const TICK_INTERVAL: f64 = 0.016;
pub const PAUSED_TICK_INTERVAL: f64 = 0.1;

// Collision flash
pub const FLASH_STEPS: u32 = 8;
pub const FLASH_DURATION_MS: u32 = 450;
pub const FLASH_PEAK: f64 = 220.0;

// CRT frame
pub const BORDER_LAYER: f32 = 32.0;
pub const INNER_THIN: f32 = BORDER_LAYER / 4.0;
pub const SCANLINE_STEP: usize = 3;

// Persistence
pub const FRAME_SAVE_INTERVAL: u64 = 30;
pub const FRAMES_DIR: &str = "frames_meta";
pub const CONFIG_DEFAULT_PATH: &str = "zigzag_config.json";
