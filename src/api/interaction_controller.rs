use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult};
use crate::interaction::{DragInput, ScrollEffect};
use crate::render::Renderer;

use super::ChartWidget;

impl<R: Renderer> ChartWidget<R> {
    pub fn pointer_down(&mut self, x: f64) -> ChartResult<ScrollEffect> {
        self.begin_drag(DragInput::Pointer, x)
    }

    pub fn pointer_move(&mut self, x: f64) -> ChartResult<ScrollEffect> {
        let effect = self.scroll.pointer_move(x)?;
        self.apply_scroll_effect(effect)
    }

    pub fn pointer_up(&mut self) -> ChartResult<ScrollEffect> {
        let effect = self.scroll.pointer_up();
        self.apply_scroll_effect(effect)
    }

    pub fn pointer_leave(&mut self) -> ChartResult<ScrollEffect> {
        let effect = self.scroll.pointer_leave();
        self.apply_scroll_effect(effect)
    }

    pub fn touch_start(&mut self, x: f64) -> ChartResult<ScrollEffect> {
        self.begin_drag(DragInput::Touch, x)
    }

    pub fn touch_move(&mut self, x: f64) -> ChartResult<ScrollEffect> {
        let effect = self.scroll.touch_move(x)?;
        self.apply_scroll_effect(effect)
    }

    pub fn touch_end(&mut self) -> ChartResult<ScrollEffect> {
        let effect = self.scroll.touch_end();
        self.apply_scroll_effect(effect)
    }

    /// Sets the offset directly, e.g. from a native scrollbar or wheel.
    pub fn scroll_to_offset(&mut self, offset_px: f64) -> ChartResult<ScrollEffect> {
        self.cancel_pending_scroll("user scroll");
        let effect = self.scroll.scroll_to_offset(offset_px)?;
        self.apply_scroll_effect(effect)
    }

    /// Starts a smooth scroll centering `index`; `None` while a drag is active.
    pub fn scroll_to_index(&mut self, index: usize) -> ChartResult<Option<f64>> {
        if index >= self.store.len() {
            return Err(ChartError::InvalidData(format!(
                "scroll target index {index} out of range for {} points",
                self.store.len()
            )));
        }
        let spacing = self.mapper.geometry().point_spacing_px;
        self.scroll.scroll_to_index(index, spacing)
    }

    /// Advances timers: the pending initial scroll and any scroll animation.
    ///
    /// Returns `true` when the scroll offset moved.
    pub fn tick(&mut self, delta_seconds: f64) -> ChartResult<bool> {
        if !delta_seconds.is_finite() || delta_seconds < 0.0 {
            return Err(ChartError::InvalidData(
                "tick delta must be finite and >= 0".to_owned(),
            ));
        }

        if let Some(pending) = &mut self.pending_scroll {
            pending.remaining_seconds -= delta_seconds;
            if pending.remaining_seconds <= 0.0 {
                let index = pending.index;
                self.pending_scroll = None;
                debug!(index, "initial scroll fired");
                self.scroll_to_index(index)?;
                return Ok(false);
            }
        }

        let before = self.scroll.offset_px();
        if self.scroll.step_animation(delta_seconds)?.is_none() {
            return Ok(false);
        }
        self.refresh_tooltip()?;
        Ok(self.scroll.offset_px() != before)
    }

    /// Anchors the tooltip on the point nearest to viewport-relative `x`.
    pub fn hover_at(&mut self, viewport_x: f64) -> ChartResult<Option<usize>> {
        let index = self.index_at(viewport_x)?;
        self.set_active_index(index)?;
        Ok(index)
    }

    /// Tap selection; a marker under the finger wins over the nearest column.
    pub fn tap_at(&mut self, viewport_x: f64, viewport_y: f64) -> ChartResult<Option<usize>> {
        let index = match self.marker_hit(viewport_x, viewport_y)? {
            Some(index) => Some(index),
            None => self.index_at(viewport_x)?,
        };
        trace!(viewport_x, ?index, "tap selection");
        self.set_active_index(index)?;
        Ok(index)
    }

    /// Sets or clears the tooltip anchor. Returns whether it changed.
    pub fn set_active_index(&mut self, index: Option<usize>) -> ChartResult<bool> {
        if let Some(index) = index {
            if index >= self.store.len() {
                return Err(ChartError::InvalidData(format!(
                    "active index {index} out of range for {} points",
                    self.store.len()
                )));
            }
        }
        let changed = self.tooltip.set_active(index);
        self.refresh_tooltip()?;
        Ok(changed)
    }

    pub fn clear_selection(&mut self) -> ChartResult<bool> {
        self.set_active_index(None)
    }

    /// Index of the marker whose clickable circle contains the viewport point.
    pub fn marker_hit(&self, viewport_x: f64, viewport_y: f64) -> ChartResult<Option<usize>> {
        ensure_finite(viewport_x, "hit x")?;
        ensure_finite(viewport_y, "hit y")?;
        let canvas_x = viewport_x + self.scroll.offset_px();
        Ok(self
            .build_markers()
            .iter()
            .rev()
            .find(|marker| marker.contains(canvas_x, viewport_y))
            .map(|marker| marker.index))
    }

    fn index_at(&self, viewport_x: f64) -> ChartResult<Option<usize>> {
        ensure_finite(viewport_x, "pointer x")?;
        Ok(self.mapper.to_index(viewport_x + self.scroll.offset_px()))
    }

    fn begin_drag(&mut self, input: DragInput, x: f64) -> ChartResult<ScrollEffect> {
        let effect = self.scroll.begin_drag(input, x)?;
        if effect.capture.is_some() {
            self.cancel_pending_scroll("drag");
        }
        self.apply_scroll_effect(effect)
    }

    fn cancel_pending_scroll(&mut self, reason: &str) {
        if let Some(pending) = self.pending_scroll.take() {
            debug!(index = pending.index, reason, "pending initial scroll cancelled");
        }
    }

    fn apply_scroll_effect(&mut self, effect: ScrollEffect) -> ChartResult<ScrollEffect> {
        if effect.offset_changed {
            self.refresh_tooltip()?;
        }
        Ok(effect)
    }
}

fn ensure_finite(value: f64, name: &str) -> ChartResult<()> {
    if !value.is_finite() {
        return Err(ChartError::InvalidData(format!("{name} must be finite")));
    }
    Ok(())
}
