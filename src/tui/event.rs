//! Event handling for the TUI
//!
//! Terminal input is read on a dedicated thread. Background work (session
//! changes, finished deliveries) posts into the same channel through a
//! cloned sender.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::delivery::DeliveryReceipt;
use crate::error::DeliveryError;

/// Which form a delivery belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionTarget {
    Sheet,
    Returns,
}

/// TUI events
#[derive(Debug, Clone)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
    /// Signed in (with the name to greet) or signed out
    SessionChanged(Option<String>),
    /// A background delivery completed
    SubmissionFinished {
        target: SubmissionTarget,
        outcome: Result<DeliveryReceipt, DeliveryError>,
    },
}

/// Event handler for terminal and application events
pub struct EventHandler {
    sender: mpsc::Sender<Event>,
    receiver: mpsc::Receiver<Event>,
    #[allow(dead_code)]
    handler: thread::JoinHandle<()>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        let handler = {
            let sender = sender.clone();
            thread::spawn(move || {
                let mut last_tick = Instant::now();
                loop {
                    let timeout = tick_rate
                        .checked_sub(last_tick.elapsed())
                        .unwrap_or(Duration::ZERO);

                    // A broken terminal ends input; the receiver sees the disconnect
                    let ready = match event::poll(timeout) {
                        Ok(ready) => ready,
                        Err(_) => return,
                    };
                    if ready {
                        let sent = match event::read() {
                            Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                                sender.send(Event::Key(key))
                            }
                            Ok(CrosstermEvent::Resize(width, height)) => {
                                sender.send(Event::Resize(width, height))
                            }
                            Ok(_) => Ok(()),
                            Err(_) => return,
                        };
                        if sent.is_err() {
                            return;
                        }
                    }

                    if last_tick.elapsed() >= tick_rate {
                        if sender.send(Event::Tick).is_err() {
                            return;
                        }
                        last_tick = Instant::now();
                    }
                }
            })
        };

        Self {
            sender,
            receiver,
            handler,
        }
    }

    /// A sender for posting application events
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.sender.clone()
    }

    /// Get the next event (blocking)
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.receiver.recv()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}
