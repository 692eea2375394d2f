use tracing::info;

use crate::listener::Listener;
use crate::model::*;

// [EventPrinter]
#[derive(Debug, Default)]
pub struct EventPrinter {
    count: usize,
}

impl EventPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Listener for EventPrinter {
    fn notify_event(&mut self, event: &Event) {
        use Event::*;
        self.count += 1;
        let seq = self.count;
        match event {
            Used(e) => {
                info!(seq = seq, "Used {} (remaining: {})", e.tile, e.remaining);
            }
            Restored(e) => {
                info!(seq = seq, "Restored {} (remaining: {})", e.tile, e.remaining);
            }
            Depleted(e) => {
                info!(seq = seq, "Depleted {}", e.tile);
            }
            HandChanged(e) => {
                info!(seq = seq, "HandChanged [{}]", tiles_to_string(&e.entries));
            }
            InventoryChanged(e) => {
                let available = e.snapshot.values().filter(|&&n| n > 0).count();
                info!(
                    seq = seq,
                    "InventoryChanged ({} of {} types available)",
                    available,
                    e.snapshot.len()
                );
            }
        }
    }
}

#[test]
fn test_event_printer() {
    let mut printer = EventPrinter::new();
    printer.notify_event(&Event::used(Tile(TB, 1), 3));
    printer.notify_event(&Event::hand_changed(vec![Tile(TB, 1)]));
    assert_eq!(printer.count(), 2);
}
