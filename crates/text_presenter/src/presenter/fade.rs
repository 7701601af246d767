//! Opacity fade job

use super::JobStep;
use crate::foundation::math::smoothstep;
use crate::foundation::time::FrameTime;
use crate::ui::LabelHandle;

/// Smoothstep fade of a label's opacity
pub struct FadeJob {
    label: LabelHandle,
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    use_unscaled_time: bool,
    complete: bool,
}

impl FadeJob {
    /// Start fading from the label's current opacity to `to`
    ///
    /// A non-positive duration applies `to` immediately and returns a
    /// completed job. Returns `None` if the label is gone.
    pub fn start(label: &LabelHandle, to: f32, duration: f32, use_unscaled_time: bool) -> Option<Self> {
        let shared = label.upgrade()?;
        let mut surface = shared.borrow_mut();

        let mut job = Self {
            label: label.clone(),
            from: surface.opacity(),
            to,
            duration,
            elapsed: 0.0,
            use_unscaled_time,
            complete: false,
        };
        if duration.is_nan() || duration <= 0.0 {
            surface.set_opacity(to);
            job.complete = true;
        }
        Some(job)
    }

    /// Advance the fade by one frame
    pub fn tick(&mut self, time: &FrameTime) -> JobStep {
        if self.complete {
            return JobStep::Completed;
        }
        let Some(shared) = self.label.upgrade() else {
            return JobStep::Abandoned;
        };
        let mut surface = shared.borrow_mut();

        self.elapsed += time.delta_for(self.use_unscaled_time);
        if self.elapsed >= self.duration {
            surface.set_opacity(self.to);
            self.complete = true;
            return JobStep::Completed;
        }

        let k = smoothstep(self.elapsed / self.duration);
        surface.set_opacity(self.from + (self.to - self.from) * k);
        JobStep::Running
    }

    /// Whether the target opacity has been reached
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
