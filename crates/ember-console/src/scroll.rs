//! Viewport position and the deferred scroll-to-bottom task

use std::time::{Duration, Instant};
use tracing::debug;

/// The window of lines currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    top: usize,
    rows: usize,
    visible: bool,
}

impl Viewport {
    pub fn new(rows: usize) -> Self {
        Self {
            top: 0,
            rows,
            visible: true,
        }
    }

    /// First line shown
    pub fn top(&self) -> usize {
        self.top
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_rows(&mut self, rows: usize) {
        self.rows = rows;
    }

    /// Largest useful `top` for a document of `line_count` lines
    pub fn max_top(&self, line_count: usize) -> usize {
        line_count.saturating_sub(self.rows)
    }

    pub fn is_at_bottom(&self, line_count: usize) -> bool {
        self.top >= self.max_top(line_count)
    }

    pub fn scroll_to(&mut self, top: usize, line_count: usize) {
        self.top = top.min(self.max_top(line_count));
    }

    pub fn scroll_to_bottom(&mut self, line_count: usize) {
        self.top = self.max_top(line_count);
    }
}

/// A single pending scroll-to-bottom, fired once its delay has elapsed.
///
/// Scheduling again replaces the pending task, so a burst of output scrolls
/// once after it settles.
#[derive(Debug, Clone)]
pub struct DeferredScroll {
    delay: Duration,
    due: Option<Instant>,
}

impl DeferredScroll {
    pub fn new(delay: Duration) -> Self {
        Self { delay, due: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    pub fn schedule(&mut self, now: Instant) {
        self.due = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    /// Fire the task if it is due. Returns `true` if the viewport moved.
    ///
    /// A due task on a hidden viewport is consumed without scrolling.
    pub fn poll(&mut self, now: Instant, viewport: &mut Viewport, line_count: usize) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                if !viewport.is_visible() {
                    debug!("Viewport hidden, skipping deferred scroll");
                    return false;
                }
                let before = viewport.top();
                viewport.scroll_to_bottom(line_count);
                viewport.top() != before
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(100);

    #[test]
    fn test_viewport_bounds() {
        let mut viewport = Viewport::new(10);
        viewport.scroll_to(50, 25);
        assert_eq!(viewport.top(), 15);
        assert!(viewport.is_at_bottom(25));
        assert!(!viewport.is_at_bottom(30));

        viewport.scroll_to(3, 5);
        assert_eq!(viewport.top(), 0);
    }

    #[test]
    fn test_fires_after_delay() {
        let start = Instant::now();
        let mut scroll = DeferredScroll::new(DELAY);
        let mut viewport = Viewport::new(10);

        scroll.schedule(start);
        assert!(!scroll.poll(start + DELAY / 2, &mut viewport, 40));
        assert!(scroll.is_pending());

        assert!(scroll.poll(start + DELAY, &mut viewport, 40));
        assert_eq!(viewport.top(), 30);
        assert!(!scroll.is_pending());
    }

    #[test]
    fn test_reschedule_replaces_pending() {
        let start = Instant::now();
        let mut scroll = DeferredScroll::new(DELAY);
        let mut viewport = Viewport::new(10);

        scroll.schedule(start);
        scroll.schedule(start + DELAY / 2);
        assert!(!scroll.poll(start + DELAY, &mut viewport, 40));
        assert!(scroll.poll(start + DELAY * 2, &mut viewport, 40));
    }

    #[test]
    fn test_hidden_viewport_is_noop() {
        let start = Instant::now();
        let mut scroll = DeferredScroll::new(DELAY);
        let mut viewport = Viewport::new(10);
        viewport.set_visible(false);

        scroll.schedule(start);
        assert!(!scroll.poll(start + DELAY, &mut viewport, 40));
        assert_eq!(viewport.top(), 0);
        assert!(!scroll.is_pending());
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut scroll = DeferredScroll::new(DELAY);
        let mut viewport = Viewport::new(10);

        scroll.schedule(start);
        scroll.cancel();
        assert!(!scroll.poll(start + DELAY, &mut viewport, 40));
        assert_eq!(viewport.top(), 0);
    }
}
