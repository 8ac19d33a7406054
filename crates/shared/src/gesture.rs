//! Drag gesture state.
//!
//! Mouse and touch input are adapted into [`PointerSample`]s before they get
//! here, so the machine never branches on input modality. It has exactly two
//! states: Idle (no recorded pointer) and Dragging (last pointer recorded).
//! Deltas are incremental against the previous sample rather than anchored
//! to the drag start, which keeps mid-drag zoom changes from accumulating
//! drift.

/// One pointer position in surface-relative pixels, whatever device it came
/// from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
}

impl PointerSample {
    pub const fn new(x: f64, y: f64) -> Self {
        PointerSample { x, y }
    }
}

/// Idle/Dragging machine. Invalid input (no usable sample) is a no-op tick:
/// callers simply don't call in, and the state stays put.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    last: Option<PointerSample>,
}

impl GestureState {
    pub fn new() -> Self {
        GestureState::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    /// Pointer went down on the surface: enter Dragging.
    pub fn begin(&mut self, at: PointerSample) {
        self.last = Some(at);
    }

    /// Pointer moved. Returns the delta since the previous sample and
    /// records the new one; returns None while Idle.
    pub fn advance(&mut self, to: PointerSample) -> Option<(f64, f64)> {
        let last = self.last?;
        self.last = Some(to);
        Some((to.x - last.x, to.y - last.y))
    }

    /// Pointer released, from anywhere including outside the surface. Back to
    /// Idle with no recorded position.
    pub fn end(&mut self) {
        self.last = None;
    }
}
