// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Start/stop control for the per-frame update and paint cycle.
//!
//! The loop has no external stop: it ends itself on the first frame that finds the toast
//! settled, after that frame has been painted.

use crate::host::FrameScheduler;

/// Whether frames are being requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LoopState {
    /// No frame is pending.
    #[default]
    Stopped,
    /// A frame is pending or being processed.
    Running,
}

/// Render loop bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct RenderLoop {
    state: LoopState,
    frames: u64,
    run_frames: u64,
}

impl RenderLoop {
    /// A stopped loop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Whether a frame is pending.
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Frames processed since creation.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Start the loop if it is stopped. Returns `true` if a frame was requested.
    pub fn start(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = LoopState::Running;
        self.run_frames = 0;
        scheduler.request_frame();
        tracing::trace!("render loop started");
        true
    }

    /// Finish a painted frame: stop if `settled`, otherwise request the next one.
    ///
    /// Returns `true` if the loop stopped.
    pub fn finish_frame(&mut self, settled: bool, scheduler: &mut impl FrameScheduler) -> bool {
        self.frames += 1;
        self.run_frames += 1;
        if settled {
            self.state = LoopState::Stopped;
            tracing::trace!(frames = self.run_frames, "render loop settled");
            true
        } else {
            scheduler.request_frame();
            false
        }
    }
}
