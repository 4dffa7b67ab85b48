//! Utility helpers for tests.
//!
//! Provides road profiles with a fixed grade, an in-memory writer for
//! capturing rendered frames, and shorthand constructors for control loops.

pub mod road;

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use fuzzy_cruise::{CruiseControl, InferenceEngine, Vehicle};

pub use road::{FixedRoad, ScriptedRoad};

/// Cloneable writer that appends into a shared byte buffer.
///
/// Hand one clone to a `FrameSink` and keep another to read what was written.
///
/// # Examples
/// ```
/// use std::io::Write;
/// use test_utils::SharedBuffer;
///
/// let buffer = SharedBuffer::default();
/// let mut writer = buffer.clone();
/// writer.write_all(b"tick").unwrap();
/// assert_eq!(buffer.contents(), "tick");
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Returns everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Returns the written output split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Builds a control loop on a road fixed at `angle` degrees.
///
/// # Examples
/// ```
/// use test_utils::control_at;
///
/// let mut control = control_at(0.0, 70.0, 70.0);
/// control.tick();
/// assert_eq!(control.vehicle().current_speed(), 70.0);
/// ```
pub fn control_at(angle: f64, current_speed: f64, target_speed: f64) -> CruiseControl<FixedRoad> {
    CruiseControl::new(
        FixedRoad::new(angle),
        Vehicle::new(current_speed, target_speed),
        InferenceEngine::default(),
    )
}
