//! Horizontal card carousel navigation state.
//!
//! The carousel keeps `current_index` and the scroll button flags in sync with
//! a [`Viewport`], snaps to the nearest card once user scrolling settles, and
//! animates programmatic navigation either natively or with a manual eased
//! scroll. It is driven entirely by [`CarouselEvent`]s and a caller-supplied
//! monotonic clock, so the host owns every timer and animation frame:
//!
//! - call [`Carousel::dispatch`] with [`CarouselEvent::Scrolled`] from the
//!   container's scroll listener, [`CarouselEvent::Resized`] from its resize
//!   observer, and the pointer events from its pointer listeners;
//! - while [`Carousel::is_animating`] is true, dispatch
//!   [`CarouselEvent::Frame`] on every animation frame;
//! - otherwise dispatch [`CarouselEvent::Frame`] once [`Carousel::next_wakeup`]
//!   is reached.
//!
//! After [`Carousel::detach`] no pending work survives and no event mutates
//! the state.

mod snap;
mod viewport;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

pub use snap::{ease_out_cubic, nearest_index, ScrollAnimation};
pub use viewport::{max_scroll_offset, parse_gap, resolve_gap, Viewport};

/// Tolerance for the scroll button flags, in pixels.
pub const SCROLL_EPSILON: f64 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarouselConfig {
    /// Gap between cards when the computed gap cannot be read.
    #[serde(default = "default_gap")]
    pub gap: f64,

    /// Use native smooth scrolling when the viewport supports it.
    #[serde(default = "default_true")]
    pub smooth_behavior: bool,

    /// Snap only when the nearest card is further than this, in pixels.
    #[serde(default = "default_snap_threshold")]
    pub snap_threshold: f64,

    #[serde(default = "default_scroll_idle_ms")]
    pub scroll_idle_ms: u64,

    #[serde(default = "default_pointer_release_ms")]
    pub pointer_release_ms: u64,

    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
}

fn default_gap() -> f64 {
    16.0
}

fn default_true() -> bool {
    true
}

fn default_snap_threshold() -> f64 {
    5.0
}

fn default_scroll_idle_ms() -> u64 {
    150
}

fn default_pointer_release_ms() -> u64 {
    50
}

fn default_animation_ms() -> u64 {
    300
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            gap: default_gap(),
            smooth_behavior: true,
            snap_threshold: default_snap_threshold(),
            scroll_idle_ms: default_scroll_idle_ms(),
            pointer_release_ms: default_pointer_release_ms(),
            animation_ms: default_animation_ms(),
        }
    }
}

impl CarouselConfig {
    fn scroll_idle(&self) -> Duration {
        Duration::from_millis(self.scroll_idle_ms)
    }

    fn pointer_release(&self) -> Duration {
        Duration::from_millis(self.pointer_release_ms)
    }

    fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }
}

/// Navigation state exposed to the buttons and indicators around a carousel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CarouselState {
    pub current_index: usize,
    pub can_scroll_left: bool,
    pub can_scroll_right: bool,
    pub is_scrolling: bool,
}

impl CarouselState {
    /// State before a viewport is attached.
    pub fn initial(item_count: usize) -> Self {
        Self {
            current_index: 0,
            can_scroll_left: false,
            can_scroll_right: item_count > 0,
            is_scrolling: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    /// The container's scroll offset changed.
    Scrolled,
    /// The container or its cards changed size.
    Resized,
    PointerDown,
    PointerUp,
    ScrollLeft,
    ScrollRight,
    /// Navigate to a card; out-of-range indices are clamped.
    ScrollToIndex(isize),
    /// Animation frame or timer tick.
    Frame,
}

pub struct Carousel<V> {
    config: CarouselConfig,
    item_count: usize,
    viewport: Option<V>,
    positions: Vec<f64>,
    state: CarouselState,
    animation: Option<ScrollAnimation>,
    snap_due: Option<Duration>,
    release_due: Option<Duration>,
    dragging: bool,
}

impl<V: Viewport> Carousel<V> {
    pub fn new(item_count: usize, config: CarouselConfig) -> Self {
        Self {
            config,
            item_count,
            viewport: None,
            positions: Vec::new(),
            state: CarouselState::initial(item_count),
            animation: None,
            snap_due: None,
            release_due: None,
            dragging: false,
        }
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn is_attached(&self) -> bool {
        self.viewport.is_some()
    }

    pub fn viewport(&self) -> Option<&V> {
        self.viewport.as_ref()
    }

    pub fn viewport_mut(&mut self) -> Option<&mut V> {
        self.viewport.as_mut()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether a manual scroll animation needs animation frames.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Earliest pending timer, if any.
    pub fn next_wakeup(&self) -> Option<Duration> {
        match (self.snap_due, self.release_due) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Mount: bind the viewport and measure it.
    pub fn attach(&mut self, viewport: V) {
        self.viewport = Some(viewport);
        self.dragging = false;
        self.measure();
        self.recompute();
    }

    /// Unmount: cancel the animation and both timers and hand the viewport back.
    pub fn detach(&mut self) -> Option<V> {
        self.animation = None;
        self.snap_due = None;
        self.release_due = None;
        self.dragging = false;
        self.viewport.take()
    }

    /// The set of cards changed.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
        if item_count == 0 {
            self.animation = None;
            self.state.is_scrolling = false;
        }
        if self.viewport.is_none() {
            self.state = CarouselState::initial(item_count);
            return;
        }
        self.measure();
        self.recompute();
    }

    /// Apply one event. Returns whether the visible state changed.
    pub fn dispatch(&mut self, event: CarouselEvent, now: Duration) -> bool {
        let before = self.state;
        if self.viewport.is_none() {
            return false;
        }

        match event {
            CarouselEvent::Scrolled => self.on_scroll(now),
            CarouselEvent::Resized => {
                self.measure();
                self.recompute();
            }
            CarouselEvent::PointerDown => self.on_pointer_down(),
            CarouselEvent::PointerUp => self.on_pointer_up(now),
            CarouselEvent::ScrollLeft => {
                let index = self.state.current_index as isize - 1;
                self.scroll_to_index(index, now);
            }
            CarouselEvent::ScrollRight => {
                let index = self.state.current_index as isize + 1;
                self.scroll_to_index(index, now);
            }
            CarouselEvent::ScrollToIndex(index) => self.scroll_to_index(index, now),
            CarouselEvent::Frame => self.on_frame(now),
        }

        self.state != before
    }

    fn ready(&self) -> bool {
        self.viewport.is_some() && self.item_count > 0
    }

    fn measure(&mut self) {
        self.positions = match &self.viewport {
            Some(v) => viewport::item_positions(v, self.item_count, self.config.gap),
            None => Vec::new(),
        };
    }

    fn recompute(&mut self) {
        let Some(viewport) = &self.viewport else {
            return;
        };
        if self.item_count == 0 {
            self.state = CarouselState {
                current_index: 0,
                can_scroll_left: false,
                can_scroll_right: false,
                is_scrolling: self.state.is_scrolling,
            };
            return;
        }

        let offset = viewport.scroll_offset();
        let max = max_scroll_offset(viewport);
        self.state.current_index = nearest_index(&self.positions, offset)
            .unwrap_or(0)
            .min(self.item_count - 1);
        self.state.can_scroll_left = offset > SCROLL_EPSILON;
        self.state.can_scroll_right = offset < max - SCROLL_EPSILON;
    }

    /// Scroll offset that brings card `index` to the left edge.
    fn target_offset(&self, index: usize) -> f64 {
        let max = self.viewport.as_ref().map_or(0.0, max_scroll_offset);
        self.positions
            .get(index)
            .copied()
            .unwrap_or(0.0)
            .clamp(0.0, max)
    }

    fn scroll_to_index(&mut self, index: isize, now: Duration) {
        if !self.ready() {
            return;
        }
        let index = index.clamp(0, self.item_count as isize - 1) as usize;
        let target = self.target_offset(index);
        self.animation = None;

        let smooth = self.config.smooth_behavior;
        let animation = self.config.animation();
        let idle = self.config.scroll_idle();
        let Some(viewport) = self.viewport.as_mut() else {
            return;
        };

        if smooth && viewport.supports_smooth_scroll() {
            viewport.scroll_to(target, true);
            // Settles through the idle timer even if no scroll event follows.
            self.snap_due = Some(now + idle);
        } else {
            self.animation = Some(ScrollAnimation {
                from: viewport.scroll_offset(),
                to: target,
                started: now,
                duration: animation,
            });
        }
        self.state.is_scrolling = true;
        trace!(index, target, "Carousel scrolling to card");
    }

    /// Animate to the nearest card once scrolling has settled.
    fn snap_to_closest(&mut self, now: Duration) {
        if !self.ready() || self.dragging || self.animation.is_some() {
            return;
        }
        let Some(offset) = self.viewport.as_ref().map(|v| v.scroll_offset()) else {
            return;
        };
        let Some(index) = nearest_index(&self.positions, offset) else {
            return;
        };
        let distance = (self.target_offset(index) - offset).abs();
        if distance > self.config.snap_threshold {
            trace!(index, distance, "Carousel snapping to nearest card");
            self.scroll_to_index(index as isize, now);
        }
    }

    fn on_scroll(&mut self, now: Duration) {
        self.recompute();
        self.snap_due = Some(now + self.config.scroll_idle());
    }

    fn on_pointer_down(&mut self) {
        self.dragging = true;
        self.release_due = None;
        self.animation = None;
        self.state.is_scrolling = false;
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.set_smooth_behavior(false);
        }
    }

    fn on_pointer_up(&mut self, now: Duration) {
        self.dragging = false;
        let smooth = self.config.smooth_behavior;
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.set_smooth_behavior(smooth);
        }
        self.release_due = Some(now + self.config.pointer_release());
    }

    fn on_frame(&mut self, now: Duration) {
        if let Some(animation) = self.animation {
            let (offset, done) = animation.sample(now);
            if let Some(viewport) = self.viewport.as_mut() {
                viewport.scroll_to(offset, false);
            }
            if done {
                self.animation = None;
                self.state.is_scrolling = false;
            }
            self.recompute();
        }

        if self.snap_due.is_some_and(|due| due <= now) {
            self.snap_due = None;
            if self.animation.is_none() {
                self.state.is_scrolling = false;
                self.snap_to_closest(now);
            }
        }

        if self.release_due.is_some_and(|due| due <= now) {
            self.release_due = None;
            self.snap_to_closest(now);
        }
    }
}
