mod event_channel;
mod event_printer;

use std::fmt;

use crate::model::*;

pub use event_channel::{EventChannel, EventRx, EventTx};
pub use event_printer::EventPrinter;

pub trait Listener: Send {
    fn notify_event(&mut self, _event: &Event) {}
}

impl fmt::Debug for dyn Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener")
    }
}

// 登録済みのListenerに順番に通知
pub(crate) fn notify_all(listeners: &mut [Box<dyn Listener>], event: &Event) {
    for l in listeners.iter_mut() {
        l.notify_event(event);
    }
}
