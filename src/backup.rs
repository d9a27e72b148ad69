use std::io;
use std::path::{Path, PathBuf};

use log::warn;

use crate::config;
use crate::simulation::SimState;

/// Periodic dump of the object's state as small text files, one per
/// `interval` frames, overwriting nothing but its own slot.
pub struct FrameBackup {
    dir: PathBuf,
    interval: u64,
    last_written: Option<u64>,
}

impl FrameBackup {
    pub fn new(dir: impl Into<PathBuf>, interval: u64) -> Self {
        Self {
            dir: dir.into(),
            interval: interval.max(1),
            last_written: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, frame: u64) -> PathBuf {
        self.dir.join(format!("frame_{:04}.txt", frame / self.interval))
    }

    /// Write a record when the frame counter lands on the interval.
    /// Failures are logged; the simulation never depends on them.
    pub fn record_if_due(&mut self, sim: &SimState) -> Option<PathBuf> {
        let frame = sim.frame_counter;
        if frame == 0 || frame % self.interval != 0 || self.last_written == Some(frame) {
            return None;
        }
        self.last_written = Some(frame);
        match self.write_frame(sim) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("frame backup failed: {e}");
                None
            }
        }
    }

    pub fn write_frame(&self, sim: &SimState) -> io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(sim.frame_counter);
        std::fs::write(&path, format_record(sim))?;
        Ok(path)
    }
}

impl Default for FrameBackup {
    fn default() -> Self {
        Self::new(config::FRAMES_DIR, config::FRAME_SAVE_INTERVAL)
    }
}

fn format_record(sim: &SimState) -> String {
    let ball = &sim.motion.ball;
    format!(
        "[Frame {} | {}]\nBall Pos: ({:.2}, {:.2})\nDir: ({:.3}, {:.3})\nColor: {}\n",
        sim.frame_counter,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
        ball.pos.x,
        ball.pos.y,
        ball.dir.x,
        ball.dir.y,
        ball.color.to_hex(),
    )
}
