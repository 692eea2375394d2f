use crate::listener::Listener;
use crate::model::*;

pub type EventTx = std::sync::mpsc::Sender<Event>;
pub type EventRx = std::sync::mpsc::Receiver<Event>;

// 受信側が破棄されていても送信エラーは無視する
pub struct EventChannel {
    event_tx: EventTx,
}

impl EventChannel {
    pub fn new(event_tx: EventTx) -> Self {
        Self { event_tx }
    }

    pub fn pair() -> (Self, EventRx) {
        let (tx, rx) = std::sync::mpsc::channel();
        (Self::new(tx), rx)
    }
}

impl Listener for EventChannel {
    fn notify_event(&mut self, event: &Event) {
        self.event_tx.send(event.clone()).ok();
    }
}

#[test]
fn test_event_channel() {
    let (mut ch, rx) = EventChannel::pair();
    ch.notify_event(&Event::depleted(Tile(TF, FP)));
    assert_eq!(rx.try_recv().unwrap(), Event::depleted(Tile(TF, FP)));
    assert!(rx.try_recv().is_err());

    drop(rx);
    ch.notify_event(&Event::depleted(Tile(TF, FC)));
}
