//! Synchronous send-event notification
//!
//! Listeners observe a transport's send calls and may veto them. They are
//! held in an ordered list and invoked in registration order; cancelling
//! the bubble on an event stops the remaining listeners and aborts the
//! default processing of the operation.

use std::{
    error::Error as StdError,
    fmt::{self, Debug, Formatter},
};

use crate::{address::Address, message::Message};

/// Observes a transport's send calls
///
/// All hooks default to doing nothing, implementors override the ones they
/// care about.
pub trait EventListener {
    /// Invoked before the message is handed to the mail service
    ///
    /// Cancelling the bubble aborts the send.
    fn before_send(&mut self, _event: &mut SendEvent<'_>) {}

    /// Invoked after the mail service accepted the message
    fn send_performed(&mut self, _event: &SendEvent<'_>) {}

    /// Invoked when a send failed
    ///
    /// Cancelling the bubble suppresses the error.
    fn exception_thrown(&mut self, _event: &mut ExceptionEvent<'_>) {}
}

/// Outcome of a send, as seen by listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryResult {
    /// Sending has not completed yet
    Pending,
    /// The mail service accepted the message
    Success,
    /// The mail service rejected the message
    Failed,
}

/// Event surrounding a single send call
#[derive(Debug)]
pub struct SendEvent<'a> {
    message: &'a Message,
    result: DeliveryResult,
    failed_recipients: Vec<Address>,
    bubble_cancelled: bool,
}

impl<'a> SendEvent<'a> {
    fn new(message: &'a Message) -> Self {
        SendEvent {
            message,
            result: DeliveryResult::Pending,
            failed_recipients: Vec::new(),
            bubble_cancelled: false,
        }
    }

    /// The message being sent
    pub fn message(&self) -> &Message {
        self.message
    }

    /// Current delivery result
    pub fn result(&self) -> DeliveryResult {
        self.result
    }

    /// Recipients the mail service did not accept
    pub fn failed_recipients(&self) -> &[Address] {
        &self.failed_recipients
    }

    /// Abort the send without further processing
    pub fn cancel_bubble(&mut self) {
        self.bubble_cancelled = true;
    }

    /// Whether a listener aborted the send
    pub fn bubble_cancelled(&self) -> bool {
        self.bubble_cancelled
    }

    pub(crate) fn set_result(&mut self, result: DeliveryResult) {
        self.result = result;
    }

    pub(crate) fn set_failed_recipients(&mut self, failed_recipients: Vec<Address>) {
        self.failed_recipients = failed_recipients;
    }
}

/// Event surrounding a failed send call
pub struct ExceptionEvent<'a> {
    error: &'a (dyn StdError + 'static),
    bubble_cancelled: bool,
}

impl<'a> ExceptionEvent<'a> {
    fn new(error: &'a (dyn StdError + 'static)) -> Self {
        ExceptionEvent {
            error,
            bubble_cancelled: false,
        }
    }

    /// The error the send failed with
    pub fn error(&self) -> &(dyn StdError + 'static) {
        self.error
    }

    /// Suppress the error instead of returning it to the caller
    pub fn cancel_bubble(&mut self) {
        self.bubble_cancelled = true;
    }

    /// Whether a listener suppressed the error
    pub fn bubble_cancelled(&self) -> bool {
        self.bubble_cancelled
    }
}

impl Debug for ExceptionEvent<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionEvent")
            .field("error", &self.error)
            .field("bubble_cancelled", &self.bubble_cancelled)
            .finish()
    }
}

/// Ordered list of [`EventListener`]s
///
/// Events are only created while at least one listener is bound, so a
/// transport without listeners skips event handling entirely.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<Box<dyn EventListener>>,
}

impl EventDispatcher {
    /// Creates a dispatcher without listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a listener
    ///
    /// Listeners run in the order they were bound.
    pub fn bind(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.push(listener);
    }

    /// Creates the event for a send call, `None` when no listener is bound
    pub fn create_send_event<'a>(&self, message: &'a Message) -> Option<SendEvent<'a>> {
        if self.listeners.is_empty() {
            return None;
        }
        Some(SendEvent::new(message))
    }

    /// Creates the event for a failed send, `None` when no listener is bound
    pub fn create_exception_event<'a>(
        &self,
        error: &'a (dyn StdError + 'static),
    ) -> Option<ExceptionEvent<'a>> {
        if self.listeners.is_empty() {
            return None;
        }
        Some(ExceptionEvent::new(error))
    }

    /// Runs the `before_send` hooks, stopping once the bubble is cancelled
    pub fn before_send(&mut self, event: &mut SendEvent<'_>) {
        for listener in &mut self.listeners {
            listener.before_send(event);
            if event.bubble_cancelled() {
                break;
            }
        }
    }

    /// Runs the `send_performed` hooks
    pub fn send_performed(&mut self, event: &SendEvent<'_>) {
        for listener in &mut self.listeners {
            listener.send_performed(event);
        }
    }

    /// Runs the `exception_thrown` hooks, stopping once the bubble is cancelled
    pub fn exception_thrown(&mut self, event: &mut ExceptionEvent<'_>) {
        for listener in &mut self.listeners {
            listener.exception_thrown(event);
            if event.bubble_cancelled() {
                break;
            }
        }
    }
}

impl Debug for EventDispatcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::{EventDispatcher, EventListener, SendEvent};
    use crate::Message;

    struct Recorder {
        calls: Rc<RefCell<Vec<&'static str>>>,
        cancel: bool,
    }

    impl EventListener for Recorder {
        fn before_send(&mut self, event: &mut SendEvent<'_>) {
            self.calls.borrow_mut().push("before_send");
            if self.cancel {
                event.cancel_bubble();
            }
        }
    }

    fn message() -> Message {
        Message::builder()
            .from("nobody@domain.tld".parse().unwrap())
            .to("hei@domain.tld".parse().unwrap())
            .body("hi")
            .build()
            .unwrap()
    }

    #[test]
    fn no_listeners_creates_no_event() {
        let dispatcher = EventDispatcher::new();
        let message = message();
        assert!(dispatcher.create_send_event(&message).is_none());
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.bind(Box::new(Recorder {
            calls: Rc::clone(&calls),
            cancel: false,
        }));
        dispatcher.bind(Box::new(Recorder {
            calls: Rc::clone(&calls),
            cancel: false,
        }));

        let message = message();
        let mut event = dispatcher.create_send_event(&message).unwrap();
        dispatcher.before_send(&mut event);

        assert_eq!(calls.borrow().len(), 2);
        assert!(!event.bubble_cancelled());
    }

    #[test]
    fn cancelled_bubble_stops_remaining_listeners() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.bind(Box::new(Recorder {
            calls: Rc::clone(&calls),
            cancel: true,
        }));
        dispatcher.bind(Box::new(Recorder {
            calls: Rc::clone(&calls),
            cancel: false,
        }));

        let message = message();
        let mut event = dispatcher.create_send_event(&message).unwrap();
        dispatcher.before_send(&mut event);

        assert_eq!(calls.borrow().len(), 1);
        assert!(event.bubble_cancelled());
    }
}
