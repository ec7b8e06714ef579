use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult};

/// Gesture family driving a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragInput {
    Pointer,
    Touch,
}

/// Public scroll controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollMode {
    Idle,
    Dragging,
    AnimatingToTarget,
}

/// Cursor affordance over the scroll viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorStyle {
    Grab,
    Grabbing,
}

/// Listener registration the host must perform for a transition.
///
/// `Acquire` is emitted exactly once when a drag starts and `Release` exactly
/// once when it ends, so move/up listeners never outlive the drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureChange {
    Acquire(DragInput),
    Release(DragInput),
}

/// Outcome of one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use]
pub struct ScrollEffect {
    pub offset_changed: bool,
    pub capture: Option<CaptureChange>,
}

impl ScrollEffect {
    const NONE: Self = Self {
        offset_changed: false,
        capture: None,
    };

    #[must_use]
    pub fn is_noop(self) -> bool {
        !self.offset_changed && self.capture.is_none()
    }
}

/// Drag speed multipliers per gesture family.
///
/// Moves apply `origin - (x - start_x) * speed`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragTuning {
    pub pointer_speed: f64,
    pub touch_speed: f64,
}

impl Default for DragTuning {
    fn default() -> Self {
        Self {
            pointer_speed: 2.0,
            touch_speed: 1.5,
        }
    }
}

impl DragTuning {
    pub fn validate(self) -> ChartResult<Self> {
        for speed in [self.pointer_speed, self.touch_speed] {
            if !speed.is_finite() || speed == 0.0 {
                return Err(ChartError::InvalidData(
                    "drag speed multipliers must be finite and non-zero".to_owned(),
                ));
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn speed_for(self, input: DragInput) -> f64 {
        match input {
            DragInput::Pointer => self.pointer_speed,
            DragInput::Touch => self.touch_speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    EaseOutCubic,
    #[default]
    EaseInOutCubic,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollAnimationConfig {
    pub duration_seconds: f64,
    pub easing: Easing,
}

impl Default for ScrollAnimationConfig {
    fn default() -> Self {
        Self {
            duration_seconds: 0.6,
            easing: Easing::EaseInOutCubic,
        }
    }
}

impl ScrollAnimationConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.duration_seconds.is_finite() || self.duration_seconds < 0.0 {
            return Err(ChartError::InvalidData(
                "scroll animation duration must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Horizontal scroll position of the plot pane.
///
/// `offset_px` is kept in `[0, max_offset()]` after every mutation; only
/// [`ScrollSyncController`] can change it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    offset_px: f64,
    viewport_width_px: f64,
    content_width_px: f64,
}

impl ScrollState {
    #[must_use]
    pub fn offset_px(&self) -> f64 {
        self.offset_px
    }

    #[must_use]
    pub fn viewport_width_px(&self) -> f64 {
        self.viewport_width_px
    }

    #[must_use]
    pub fn content_width_px(&self) -> f64 {
        self.content_width_px
    }

    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.content_width_px - self.viewport_width_px).max(0.0)
    }

    #[must_use]
    pub fn clamp_offset(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.max_offset())
    }

    /// Whether a virtual canvas x lies inside the visible viewport.
    #[must_use]
    pub fn is_visible(&self, canvas_x: f64) -> bool {
        let viewport_x = canvas_x - self.offset_px;
        (0.0..=self.viewport_width_px).contains(&viewport_x)
    }

    fn set_offset(&mut self, offset: f64) -> bool {
        let clamped = self.clamp_offset(offset);
        let changed = clamped != self.offset_px;
        self.offset_px = clamped;
        changed
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    input: DragInput,
    start_x: f64,
    origin_offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollAnimation {
    from: f64,
    to: f64,
    elapsed: f64,
    duration: f64,
    easing: Easing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Dragging(DragSession),
    Animating(ScrollAnimation),
}

/// Owner of the plot pane scroll offset.
///
/// State machine over idle, dragging and animating-to-target. Drags cancel
/// animations; animations only start from [`ScrollSyncController::scroll_to_index`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSyncController {
    state: ScrollState,
    phase: Phase,
    tuning: DragTuning,
    animation: ScrollAnimationConfig,
}

impl ScrollSyncController {
    pub fn new(viewport_width_px: f64, content_width_px: f64) -> ChartResult<Self> {
        validate_extent(viewport_width_px, "viewport width")?;
        validate_extent(content_width_px, "content width")?;
        Ok(Self {
            state: ScrollState {
                offset_px: 0.0,
                viewport_width_px,
                content_width_px,
            },
            phase: Phase::Idle,
            tuning: DragTuning::default(),
            animation: ScrollAnimationConfig::default(),
        })
    }

    pub fn with_drag_tuning(mut self, tuning: DragTuning) -> ChartResult<Self> {
        self.tuning = tuning.validate()?;
        Ok(self)
    }

    pub fn with_animation_config(mut self, config: ScrollAnimationConfig) -> ChartResult<Self> {
        self.animation = config.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    #[must_use]
    pub fn offset_px(&self) -> f64 {
        self.state.offset_px
    }

    #[must_use]
    pub fn drag_tuning(&self) -> DragTuning {
        self.tuning
    }

    #[must_use]
    pub fn animation_config(&self) -> ScrollAnimationConfig {
        self.animation
    }

    #[must_use]
    pub fn mode(&self) -> ScrollMode {
        match self.phase {
            Phase::Idle => ScrollMode::Idle,
            Phase::Dragging(_) => ScrollMode::Dragging,
            Phase::Animating(_) => ScrollMode::AnimatingToTarget,
        }
    }

    /// Gesture family of the active drag, if any.
    #[must_use]
    pub fn drag_input(&self) -> Option<DragInput> {
        match self.phase {
            Phase::Dragging(session) => Some(session.input),
            _ => None,
        }
    }

    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        match self.phase {
            Phase::Dragging(DragSession {
                input: DragInput::Pointer,
                ..
            }) => CursorStyle::Grabbing,
            _ => CursorStyle::Grab,
        }
    }

    /// Target offset of an in-flight animation.
    #[must_use]
    pub fn animation_target(&self) -> Option<f64> {
        match self.phase {
            Phase::Animating(animation) => Some(animation.to),
            _ => None,
        }
    }

    /// Applies new viewport/content extents and re-clamps the offset.
    pub fn resize(&mut self, viewport_width_px: f64, content_width_px: f64) -> ChartResult<bool> {
        validate_extent(viewport_width_px, "viewport width")?;
        validate_extent(content_width_px, "content width")?;
        self.state.viewport_width_px = viewport_width_px;
        self.state.content_width_px = content_width_px;
        if let Phase::Animating(animation) = &mut self.phase {
            animation.to = self.state.clamp_offset(animation.to);
        }
        let offset = self.state.offset_px;
        Ok(self.state.set_offset(offset))
    }

    /// Starts a drag at viewport-relative `x`.
    ///
    /// Cancels a running animation. Ignored while another drag is active.
    pub fn begin_drag(&mut self, input: DragInput, x: f64) -> ChartResult<ScrollEffect> {
        ensure_finite(x, "drag start x")?;
        match self.phase {
            Phase::Dragging(_) => return Ok(ScrollEffect::NONE),
            Phase::Animating(animation) => {
                debug!(target_offset = animation.to, "drag cancels scroll animation");
            }
            Phase::Idle => {}
        }

        self.phase = Phase::Dragging(DragSession {
            input,
            start_x: x,
            origin_offset: self.state.offset_px,
        });
        trace!(?input, x, origin = self.state.offset_px, "drag start");
        Ok(ScrollEffect {
            offset_changed: false,
            capture: Some(CaptureChange::Acquire(input)),
        })
    }

    /// Moves the active drag of the same gesture family to `x`.
    pub fn drag_move(&mut self, input: DragInput, x: f64) -> ChartResult<ScrollEffect> {
        ensure_finite(x, "drag move x")?;
        let Phase::Dragging(session) = self.phase else {
            return Ok(ScrollEffect::NONE);
        };
        if session.input != input {
            return Ok(ScrollEffect::NONE);
        }

        let speed = self.tuning.speed_for(input);
        let target = session.origin_offset - (x - session.start_x) * speed;
        let offset_changed = self.state.set_offset(target);
        Ok(ScrollEffect {
            offset_changed,
            capture: None,
        })
    }

    /// Ends the active drag of the same gesture family.
    pub fn end_drag(&mut self, input: DragInput) -> ScrollEffect {
        match self.phase {
            Phase::Dragging(session) if session.input == input => {
                self.phase = Phase::Idle;
                trace!(?input, offset = self.state.offset_px, "drag end");
                ScrollEffect {
                    offset_changed: false,
                    capture: Some(CaptureChange::Release(input)),
                }
            }
            _ => ScrollEffect::NONE,
        }
    }

    pub fn pointer_down(&mut self, x: f64) -> ChartResult<ScrollEffect> {
        self.begin_drag(DragInput::Pointer, x)
    }

    pub fn pointer_move(&mut self, x: f64) -> ChartResult<ScrollEffect> {
        self.drag_move(DragInput::Pointer, x)
    }

    pub fn pointer_up(&mut self) -> ScrollEffect {
        self.end_drag(DragInput::Pointer)
    }

    pub fn pointer_leave(&mut self) -> ScrollEffect {
        self.end_drag(DragInput::Pointer)
    }

    pub fn touch_start(&mut self, x: f64) -> ChartResult<ScrollEffect> {
        self.begin_drag(DragInput::Touch, x)
    }

    pub fn touch_move(&mut self, x: f64) -> ChartResult<ScrollEffect> {
        self.drag_move(DragInput::Touch, x)
    }

    pub fn touch_end(&mut self) -> ScrollEffect {
        self.end_drag(DragInput::Touch)
    }

    /// Sets the offset directly (native scroll, wheel, keyboard).
    ///
    /// Cancels a running animation; ignored while dragging.
    pub fn scroll_to_offset(&mut self, offset_px: f64) -> ChartResult<ScrollEffect> {
        ensure_finite(offset_px, "scroll offset")?;
        match self.phase {
            Phase::Dragging(_) => return Ok(ScrollEffect::NONE),
            Phase::Animating(_) => self.phase = Phase::Idle,
            Phase::Idle => {}
        }
        Ok(ScrollEffect {
            offset_changed: self.state.set_offset(offset_px),
            capture: None,
        })
    }

    /// Clamped offset that centers `index` in the viewport.
    #[must_use]
    pub fn target_offset_for_index(&self, index: usize, point_spacing_px: f64) -> f64 {
        let raw = index as f64 * point_spacing_px - self.state.viewport_width_px / 2.0
            + point_spacing_px / 2.0;
        self.state.clamp_offset(raw)
    }

    /// Starts a smooth scroll that centers `index`.
    ///
    /// Returns the clamped target, or `None` when a drag is active. An
    /// animation already in flight is retargeted from the current offset.
    pub fn scroll_to_index(
        &mut self,
        index: usize,
        point_spacing_px: f64,
    ) -> ChartResult<Option<f64>> {
        if !point_spacing_px.is_finite() || point_spacing_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "point spacing must be finite and > 0".to_owned(),
            ));
        }
        if matches!(self.phase, Phase::Dragging(_)) {
            return Ok(None);
        }

        let target = self.target_offset_for_index(index, point_spacing_px);
        self.phase = Phase::Animating(ScrollAnimation {
            from: self.state.offset_px,
            to: target,
            elapsed: 0.0,
            duration: self.animation.duration_seconds,
            easing: self.animation.easing,
        });
        debug!(
            index,
            from = self.state.offset_px,
            target,
            "scroll to index"
        );
        Ok(Some(target))
    }

    /// Advances a running animation by `delta_seconds`.
    ///
    /// Returns the new offset, or `None` when nothing is animating (including
    /// when a drag took over since the previous frame).
    pub fn step_animation(&mut self, delta_seconds: f64) -> ChartResult<Option<f64>> {
        if !delta_seconds.is_finite() || delta_seconds < 0.0 {
            return Err(ChartError::InvalidData(
                "animation delta must be finite and >= 0".to_owned(),
            ));
        }
        let Phase::Animating(mut animation) = self.phase else {
            return Ok(None);
        };

        animation.elapsed += delta_seconds;
        let progress = if animation.duration <= 0.0 {
            1.0
        } else {
            (animation.elapsed / animation.duration).min(1.0)
        };

        if progress >= 1.0 {
            self.state.set_offset(animation.to);
            self.phase = Phase::Idle;
            debug!(offset = self.state.offset_px, "scroll animation finished");
        } else {
            let eased = animation.easing.apply(progress);
            let offset = animation.from + (animation.to - animation.from) * eased;
            self.state.set_offset(offset);
            self.phase = Phase::Animating(animation);
        }
        Ok(Some(self.state.offset_px))
    }
}

fn ensure_finite(value: f64, name: &str) -> ChartResult<()> {
    if !value.is_finite() {
        return Err(ChartError::InvalidData(format!("{name} must be finite")));
    }
    Ok(())
}

fn validate_extent(value: f64, name: &str) -> ChartResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(())
}
