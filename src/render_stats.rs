//! Render statistics for debugging compositor output.
//!
//! Enable with the `render-stats` feature:
//! ```bash
//! cargo test --features render-stats
//! ```
//!
//! Counters are per thread and accumulate across renders until
//! [`reset_stats`] is called. Without the feature every recorder compiles
//! to nothing and [`get_stats`] returns zeros.

/// Snapshot of accumulated render statistics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub renders: u64,
    pub renders_empty: u64,
    pub containers_entered: u64,
    pub children_missing: u64,
    pub rectangles_drawn: u64,
    pub text_lines_drawn: u64,
    pub sprites_drawn: u64,
    pub widgets_unrendered: u64,
}

#[cfg(feature = "render-stats")]
mod inner {
    use super::StatsSnapshot;
    use std::cell::RefCell;

    thread_local! {
        static STATS: RefCell<StatsSnapshot> = RefCell::new(StatsSnapshot::default());
    }

    fn bump(field: impl FnOnce(&mut StatsSnapshot) -> &mut u64) {
        STATS.with(|s| *field(&mut *s.borrow_mut()) += 1);
    }

    /// Record a call to the compositor that produced a buffer.
    #[inline]
    pub fn record_render() {
        bump(|s| &mut s.renders);
    }

    /// Record a call that returned no image (bad geometry or missing root).
    #[inline]
    pub fn record_render_empty() {
        bump(|s| &mut s.renders_empty);
    }

    #[inline]
    pub fn record_container_entered() {
        bump(|s| &mut s.containers_entered);
    }

    /// Record a child slot whose id had no widget behind it.
    #[inline]
    pub fn record_child_missing() {
        bump(|s| &mut s.children_missing);
    }

    #[inline]
    pub fn record_rectangle() {
        bump(|s| &mut s.rectangles_drawn);
    }

    #[inline]
    pub fn record_text_lines(lines: usize) {
        STATS.with(|s| s.borrow_mut().text_lines_drawn += lines as u64);
    }

    #[inline]
    pub fn record_sprite() {
        bump(|s| &mut s.sprites_drawn);
    }

    /// Record a widget of a group this core does not draw.
    #[inline]
    pub fn record_unrendered() {
        bump(|s| &mut s.widgets_unrendered);
    }

    /// Return a snapshot of the current stats.
    pub fn get_stats() -> StatsSnapshot {
        STATS.with(|s| s.borrow().clone())
    }

    /// Reset all stats to zero (for test isolation).
    pub fn reset_stats() {
        STATS.with(|s| *s.borrow_mut() = StatsSnapshot::default());
    }

    /// Log the current counters at debug level.
    pub fn log_stats() {
        let stats = get_stats();
        log::debug!(
            "[Render Stats] renders={} empty={} containers={} missing_children={}",
            stats.renders,
            stats.renders_empty,
            stats.containers_entered,
            stats.children_missing
        );
        log::debug!(
            "  drawn: rectangles={} text_lines={} sprites={} unrendered={}",
            stats.rectangles_drawn,
            stats.text_lines_drawn,
            stats.sprites_drawn,
            stats.widgets_unrendered
        );
    }
}

#[cfg(feature = "render-stats")]
pub use inner::*;

// No-op implementations when feature is disabled - these get completely inlined away

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn get_stats() -> StatsSnapshot {
    StatsSnapshot::default()
}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn reset_stats() {}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn log_stats() {}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn record_render() {}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn record_render_empty() {}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn record_container_entered() {}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn record_child_missing() {}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn record_rectangle() {}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn record_text_lines(_lines: usize) {}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn record_sprite() {}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn record_unrendered() {}
