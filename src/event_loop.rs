// event_loop.rs

use crate::clock::Clock;
use crate::session::Session;
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMessage {
    Tap,
    ToggleUnit,
    PrecisionUp,
    PrecisionDown,
    SetPrecision(u32),
    Round,
    InputChar(char),
    Backspace,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Applies messages to the session one at a time, in arrival order.
pub struct EventLoop<C: Clock> {
    session: Session,
    clock: C,
}

impl<C: Clock> EventLoop<C> {
    pub fn new(session: Session, clock: C) -> Self {
        EventLoop { session, clock }
    }

    pub fn handle(&mut self, message: EngineMessage) -> LoopControl {
        debug!("Handling message: {:?}", message);
        match message {
            EngineMessage::Tap => {
                let now = self.clock.now_ms();
                match self.session.tap(now) {
                    Some(bpm) => debug!("Tap at {:.3} ms -> {:.3} BPM", now, bpm),
                    None => debug!("Tap at {:.3} ms, waiting for more taps", now),
                }
            }
            EngineMessage::ToggleUnit => {
                self.session.toggle_mode();
            }
            EngineMessage::PrecisionUp => {
                self.session.precision_up();
            }
            EngineMessage::PrecisionDown => {
                self.session.precision_down();
            }
            EngineMessage::SetPrecision(value) => {
                if let Err(e) = self.session.set_precision(value) {
                    debug!("{}", e);
                }
            }
            EngineMessage::Round => {
                self.session.round_bpm();
            }
            EngineMessage::InputChar(c) => {
                if let Err(e) = self.session.push_input_char(c) {
                    debug!("Keeping previous table: {}", e);
                }
            }
            EngineMessage::Backspace => {
                if let Err(e) = self.session.pop_input_char() {
                    debug!("Keeping previous table: {}", e);
                }
            }
            EngineMessage::Quit => {
                info!("Quit requested");
                return LoopControl::Quit;
            }
        }
        LoopControl::Continue
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}
