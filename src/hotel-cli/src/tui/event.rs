//! Async event source for the console.
//!
//! Merges crossterm input, the data refresh tick and the render tick into a
//! single [`Event`] stream with `tokio::select!`.

use std::time::Duration;

use crossterm::event::{EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;

/// Redraw roughly 30 times a second
const RENDER_RATE: Duration = Duration::from_millis(33);

#[derive(Debug, Clone)]
pub enum Event {
    /// A key press from the user.
    Key(KeyEvent),
    /// Time to re-fetch the active screen.
    Tick,
    /// Time to redraw.
    Render,
}

pub struct EventHandler {
    crossterm_stream: EventStream,
    tick_interval: tokio::time::Interval,
    render_interval: tokio::time::Interval,
}

impl EventHandler {
    /// `refresh_rate` paces [`Event::Tick`]; rendering runs at a fixed rate.
    pub fn new(refresh_rate: Duration) -> Self {
        let mut tick_interval = tokio::time::interval(refresh_rate);
        // A slow request must not cause a burst of catch-up refreshes
        tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick of an interval fires immediately; the app loads on start anyway
        tick_interval.reset();
        Self {
            crossterm_stream: EventStream::new(),
            tick_interval,
            render_interval: tokio::time::interval(RENDER_RATE),
        }
    }

    /// Wait for the next event.
    pub async fn next(&mut self) -> anyhow::Result<Event> {
        loop {
            tokio::select! {
                maybe_event = self.crossterm_stream.next() => {
                    match maybe_event {
                        // Press only; Windows also reports Release and Repeat
                        Some(Ok(crossterm::event::Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            return Ok(Event::Key(key));
                        }
                        Some(Err(e)) => return Err(e.into()),
                        None => anyhow::bail!("terminal input stream closed"),
                        _ => {}
                    }
                }
                _ = self.tick_interval.tick() => return Ok(Event::Tick),
                _ = self.render_interval.tick() => return Ok(Event::Render),
            }
        }
    }
}
