//! Stateful input controllers: horizontal scroll sync and the tooltip anchor.

mod scroll;
mod tooltip;

pub use scroll::{
    CaptureChange, CursorStyle, DragInput, DragTuning, Easing, ScrollAnimationConfig,
    ScrollEffect, ScrollMode, ScrollState, ScrollSyncController,
};
pub use tooltip::{
    OffscreenPolicy, TooltipConfig, TooltipController, TooltipItem, TooltipModel,
    TooltipPlacement, ValueDelta, value_delta,
};
