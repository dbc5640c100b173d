use glam::DVec3;

use crate::foundation::{
    config::PathsConfig,
    error::{PathError, PathResult},
};
use crate::model::paths::PathModel;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// Every well-known role evaluated at one instant. Absent roles are `None`.
pub struct StageFrame {
    /// Evaluation time in seconds, offset included.
    pub time: f64,
    /// Camera look-at point.
    pub camera_to: Option<DVec3>,
    /// Camera position.
    pub camera_eye: Option<DVec3>,
    /// Camera field of view.
    pub camera_fov: Option<f64>,
    /// Position of the fruit.
    pub the_fruit: Option<DVec3>,
    /// Position of the cloud layer.
    pub clouds: Option<DVec3>,
    /// Hour of day.
    pub day_time: Option<f64>,
    /// Hall light intensity.
    pub hall_light: Option<f64>,
    /// Room light intensity.
    pub room_light: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Notifications emitted by [`Choreographer`] state changes.
pub enum PlaybackEvent {
    /// Current frame changed.
    FrameChanged(u32),
    /// Playback started (`true`) or stopped (`false`).
    PlayStateChanged(bool),
}

/// Drives animation time over a [`PathModel`].
#[derive(Debug)]
pub struct Choreographer {
    model: PathModel,
    fps: u32,
    frame: u32,
    anim_time: f64,
    time_offset: f64,
    playing: bool,
    fast_play: bool,
}

impl Choreographer {
    /// Stopped choreographer at frame 0, using `config.fps`.
    pub fn new(model: PathModel, config: &PathsConfig) -> PathResult<Self> {
        config.validate()?;
        Ok(Self {
            model,
            fps: config.fps,
            frame: 0,
            anim_time: 0.0,
            time_offset: 0.0,
            playing: false,
            fast_play: false,
        })
    }

    /// Animated paths.
    pub fn path_model(&self) -> &PathModel {
        &self.model
    }

    /// Animated paths, for edition.
    pub fn path_model_mut(&mut self) -> &mut PathModel {
        &mut self.model
    }

    /// Frames per second.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Change the frame rate, keeping the current animation time.
    pub fn set_fps(&mut self, fps: u32) -> PathResult<Vec<PlaybackEvent>> {
        if fps == 0 {
            return Err(PathError::validation("fps must be > 0"));
        }
        self.fps = fps;
        let frame = self.frame_at(self.anim_time);
        Ok(self.move_to(frame, self.anim_time))
    }

    /// Current frame.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Whether playback is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether fast play is enabled.
    pub fn is_fast_play(&self) -> bool {
        self.fast_play
    }

    /// Seconds added to the animation time before evaluating paths.
    pub fn time_offset(&self) -> f64 {
        self.time_offset
    }

    /// Set the evaluation time offset.
    pub fn set_time_offset(&mut self, offset: f64) -> PathResult<()> {
        if !offset.is_finite() {
            return Err(PathError::validation(format!(
                "time offset must be finite (got {offset})"
            )));
        }
        self.time_offset = offset;
        Ok(())
    }

    /// Number of frames covering the longest role.
    pub fn frame_count(&self) -> u32 {
        (self.model.duration() * f64::from(self.fps)).ceil() as u32
    }

    /// Time at which paths are evaluated.
    pub fn current_time(&self) -> f64 {
        self.anim_time + self.time_offset
    }

    /// Start playback. Does nothing when already at the last frame.
    pub fn play(&mut self) -> Vec<PlaybackEvent> {
        if self.playing || self.frame >= self.frame_count() {
            return Vec::new();
        }
        self.playing = true;
        vec![PlaybackEvent::PlayStateChanged(true)]
    }

    /// Stop playback, keeping the current frame.
    pub fn pause(&mut self) -> Vec<PlaybackEvent> {
        if !self.playing {
            return Vec::new();
        }
        self.playing = false;
        vec![PlaybackEvent::PlayStateChanged(false)]
    }

    /// In fast play every [`update`](Self::update) advances exactly one frame, whatever `dt`.
    pub fn set_fast_play(&mut self, fast: bool) {
        self.fast_play = fast;
    }

    /// Stop playback and rewind to frame 0.
    pub fn reset(&mut self) -> Vec<PlaybackEvent> {
        let mut events = self.pause();
        events.extend(self.move_to(0, 0.0));
        events
    }

    /// Jump to `frame`, clamped to [`frame_count`](Self::frame_count).
    pub fn set_frame(&mut self, frame: u32) -> Vec<PlaybackEvent> {
        let frame = frame.min(self.frame_count());
        self.move_to(frame, self.frame_time(frame))
    }

    /// Advance playback by `dt` seconds. Playback stops on the last frame.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn update(&mut self, dt: f64) -> Vec<PlaybackEvent> {
        if !self.playing {
            return Vec::new();
        }
        let count = self.frame_count();
        let (frame, time) = if self.fast_play {
            let frame = self.frame.saturating_add(1);
            (frame, self.frame_time(frame))
        } else {
            let time = self.anim_time + dt.max(0.0);
            (self.frame_at(time), time)
        };

        let mut events = if frame >= count {
            self.move_to(count, self.frame_time(count))
        } else {
            self.move_to(frame, time)
        };
        if self.frame >= count {
            tracing::debug!(frame = self.frame, "animation reached its last frame");
            events.extend(self.pause());
        }
        events
    }

    /// Evaluate every well-known role at [`current_time`](Self::current_time).
    pub fn sample(&self) -> StageFrame {
        let t = self.current_time();
        let m = &self.model;
        StageFrame {
            time: t,
            camera_to: m.camera_to().and_then(|p| p.value(t)),
            camera_eye: m.camera_eye().and_then(|p| p.value(t)),
            camera_fov: m.camera_fov().and_then(|p| p.value(t)),
            the_fruit: m.the_fruit().and_then(|p| p.value(t)),
            clouds: m.clouds().and_then(|p| p.value(t)),
            day_time: m.day_time().and_then(|p| p.value(t)),
            hall_light: m.hall_light().and_then(|p| p.value(t)),
            room_light: m.room_light().and_then(|p| p.value(t)),
        }
    }

    fn frame_time(&self, frame: u32) -> f64 {
        f64::from(frame) / f64::from(self.fps)
    }

    fn frame_at(&self, time: f64) -> u32 {
        (time * f64::from(self.fps)).floor().max(0.0) as u32
    }

    fn move_to(&mut self, frame: u32, time: f64) -> Vec<PlaybackEvent> {
        self.anim_time = time;
        if frame == self.frame {
            return Vec::new();
        }
        self.frame = frame;
        vec![PlaybackEvent::FrameChanged(frame)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/choreographer.rs"]
mod tests;
