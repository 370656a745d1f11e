//! Display scheduler
//!
//! Owns the pending-record queue and the panel. Producers call
//! [`DisplayScheduler::enqueue_display`]; a periodic caller invokes
//! [`DisplayScheduler::advance_display`] once per animation frame.
//!
//! Theory of operation, per tick:
//! 1. pop the oldest record (or report [`TickStatus::Empty`])
//! 2. render it according to its style
//! 3. run its scroll phase on the panel
//! 4. if the phase has a successor and nothing else is waiting, push a
//!    fresh record with the same lines and the next scroll code
//!
//! A record whose animation is still running is dropped as soon as another
//! record is waiting, so new content is never starved by a long animation.
//!
//! The tick never blocks; frame pacing belongs to the caller.

use crate::config::{LayoutConfig, SchedulerConfig, StartupMessage};
use crate::error::QueueError;
use crate::layout::{self, Row, Style};
use crate::queue::{DisplayQueue, QUEUE_CAPACITY};
use crate::record::{DisplayRecord, PayloadSource, RECORD_LINES};
use crate::scroll::{ScrollAction, ScrollPhase};
use crate::traits::{ClockReading, ClockSource, Panel};

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TickStatus {
    /// Nothing queued (or scheduler disabled)
    Empty = 0,
    /// Record displayed without animation
    Shown = 1,
    /// Record displayed and scrolling
    ShownAndScrolled = 2,
    /// Panel cleared
    Cleared = 3,
}

impl TickStatus {
    /// Numeric status code
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Queue-driven display scheduler
pub struct DisplayScheduler<P, const N: usize = QUEUE_CAPACITY> {
    panel: P,
    queue: DisplayQueue<N>,
    layout: LayoutConfig,
    enabled: bool,
    last: Option<DisplayRecord>,
}

impl<P: Panel, const N: usize> DisplayScheduler<P, N> {
    /// Create a scheduler with the default layout
    ///
    /// `enabled = false` simulates an absent panel: every operation
    /// degrades to its empty or failure result.
    pub fn new(panel: P, enabled: bool) -> Self {
        Self::with_layout(panel, enabled, LayoutConfig::default())
    }

    /// Create a scheduler with a custom row layout
    pub fn with_layout(panel: P, enabled: bool, layout: LayoutConfig) -> Self {
        Self {
            panel,
            queue: DisplayQueue::new(),
            layout,
            enabled,
            last: None,
        }
    }

    /// Create a scheduler from configuration
    pub fn from_config(panel: P, config: &SchedulerConfig) -> Self {
        Self::with_layout(panel, config.enabled, config.layout)
    }

    /// Check if the scheduler is active
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Row layout in use
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Borrow the panel
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Mutably borrow the panel
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Consume the scheduler, returning the panel
    pub fn into_panel(self) -> P {
        self.panel
    }

    /// The underlying queue
    ///
    /// Reports true occupancy even when the scheduler is disabled.
    pub fn queue(&self) -> &DisplayQueue<N> {
        &self.queue
    }

    /// Start-up: clear the panel and show the start-up message
    ///
    /// Flushes anything already queued.
    pub fn begin(&mut self, startup: &StartupMessage) -> Result<(), QueueError> {
        if !self.enabled {
            return Err(QueueError::Disabled);
        }

        #[cfg(feature = "defmt")]
        defmt::info!("display scheduler v{} starting", crate::VERSION);

        self.absorb(|panel| panel.clear_panel());

        let [l0, l1, l2] = &startup.lines;
        self.enqueue_display(
            startup.style,
            startup.scroll,
            true,
            [
                PayloadSource::text(l0.as_str()),
                PayloadSource::text(l1.as_str()),
                PayloadSource::text(l2.as_str()),
            ],
        )
    }

    /// Push protocol
    ///
    /// Resolves the three line sources, injects the clock marker for
    /// clock styles, optionally flushes the queue, then appends.
    ///
    /// With `flush_first`, every pending record is discarded first. This is
    /// how an in-progress scroll sequence is cancelled.
    pub fn enqueue_display(
        &mut self,
        style: u8,
        scroll: u8,
        flush_first: bool,
        sources: [PayloadSource<'_>; RECORD_LINES],
    ) -> Result<(), QueueError> {
        if !self.enabled {
            return Err(QueueError::Disabled);
        }

        let record = DisplayRecord::from_sources(style, scroll, sources);

        if flush_first {
            self.queue.flush();
        }

        let result = self.queue.push(record);
        #[cfg(feature = "defmt")]
        if result.is_err() {
            defmt::debug!("display queue full, record dropped (style {})", style);
        }
        result
    }

    /// Advance one frame, reading the clock row from `clock`
    pub fn tick<C: ClockSource>(&mut self, clock: &C) -> TickStatus {
        self.advance_display(clock.now())
    }

    /// Pop/advance protocol (one animation frame)
    pub fn advance_display(&mut self, now: ClockReading) -> TickStatus {
        if !self.enabled {
            return TickStatus::Empty;
        }

        let Some(mut record) = self.queue.pop() else {
            return TickStatus::Empty;
        };

        let layout = self.layout;
        self.absorb(|panel| layout::render_record(panel, &layout, &record, now));

        // Clear style skips straight to the final phase
        if record.style == Style::Clear.code() {
            record.scroll = ScrollPhase::Clearing.code();
        }

        let transition = ScrollPhase::transition_code(record.scroll);

        match transition.action {
            ScrollAction::Freeze | ScrollAction::FreezeThenArm => {
                self.absorb(|panel| panel.stop_scroll());
            }
            ScrollAction::Scroll(direction) => {
                self.absorb(|panel| panel.start_scroll(direction));
            }
            ScrollAction::Clear => {
                self.absorb(|panel| {
                    panel.clear_panel()?;
                    panel.present()
                });
            }
        }

        if let Some(next) = transition.next {
            if self.queue.is_empty() {
                let [l0, l1, l2] = &record.payloads;
                let requeued = DisplayRecord::from_sources(
                    record.style,
                    next.code(),
                    [
                        PayloadSource::text(l0.as_str()),
                        PayloadSource::text(l1.as_str()),
                        PayloadSource::text(l2.as_str()),
                    ],
                );
                // Queue was just seen empty, so this cannot fail
                let _ = self.queue.push(requeued);
            } else {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "{} records waiting, scroll of style {} abandoned",
                    self.queue.count(),
                    record.style
                );
            }
        }

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "tick style={} scroll={} status={}",
            record.style,
            record.scroll,
            transition.status
        );

        record.result = Some(transition.status);
        self.last = Some(record);
        transition.status
    }

    /// Style code of the head-of-queue record
    pub fn peek_style(&self) -> Option<u8> {
        if !self.enabled {
            return None;
        }
        self.queue.front().map(|r| r.style)
    }

    /// Number of pending records (0 when disabled)
    pub fn queued_count(&self) -> usize {
        if !self.enabled {
            return 0;
        }
        self.queue.count()
    }

    /// Discard every pending record
    pub fn flush(&mut self) {
        if self.enabled {
            self.queue.flush();
        }
    }

    /// Record displayed by the most recent non-empty tick, with its result
    pub fn last_record(&self) -> Option<&DisplayRecord> {
        self.last.as_ref()
    }

    /// Clear the panel and present immediately
    pub fn clear(&mut self) {
        if !self.enabled {
            return;
        }
        self.absorb(|panel| {
            panel.clear_panel()?;
            panel.present()
        });
    }

    /// Present whatever has been drawn
    pub fn show(&mut self) {
        if !self.enabled {
            return;
        }
        self.absorb(|panel| panel.present());
    }

    /// Render a record now, bypassing the queue and scroll handling
    pub fn render_immediate(&mut self, record: &DisplayRecord, now: ClockReading) {
        if !self.enabled {
            return;
        }
        let layout = self.layout;
        self.absorb(|panel| layout::render_record(panel, &layout, record, now));
    }

    /// Draw text on a single row without clearing or presenting
    pub fn set_row_text(&mut self, row: Row, text: &str) {
        if !self.enabled {
            return;
        }
        let geometry = row.geometry(&self.layout);
        self.absorb(|panel| layout::draw_row(panel, geometry, text));
    }

    /// Run a panel operation, logging and absorbing failures
    fn absorb<F>(&mut self, op: F)
    where
        F: FnOnce(&mut P) -> Result<(), P::Error>,
    {
        if let Err(_e) = op(&mut self.panel) {
            #[cfg(feature = "defmt")]
            defmt::warn!("panel operation failed: {}", defmt::Debug2Format(&_e));
        }
    }
}
