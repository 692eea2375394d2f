use rand::prelude::*;
use rand::rngs::StdRng;

use mahjong_request::model::*;
use mahjong_request::{Catalog, Coordinator, EventChannel, PickError, ReturnError, Settings};

fn tile(s: &str) -> Tile {
    Tile::from_symbol(s).unwrap()
}

fn assert_conserved(c: &Coordinator) {
    for &t in c.catalog().tiles() {
        assert_eq!(
            c.remaining(t) + c.count_in_hand(t),
            c.catalog().capacity(t),
            "tile {}",
            t
        );
    }
    assert!(c.is_consistent());
}

// ランダムな選択・返却を繰り返しても保存則が崩れないこと
#[test]
fn test_random_pick_and_return() {
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut c = Coordinator::default();
        let tiles = c.catalog().tiles().to_vec();

        for _ in 0..2000 {
            if c.hand().is_empty() || rng.gen_bool(0.6) {
                let &t = tiles.choose(&mut rng).unwrap();
                let before = c.remaining(t);
                match c.pick(t) {
                    Ok(i) => {
                        assert_eq!(c.remaining(t), before - 1);
                        assert_eq!(c.hand().entries()[i], t);
                    }
                    Err(e) => {
                        assert_eq!(e, PickError::Unavailable(t));
                        assert_eq!(before, 0);
                    }
                }
            } else {
                // 範囲外のIndexも混ぜる
                let i = rng.gen_range(0..c.hand().len() + 2);
                let len = c.hand().len();
                match c.return_at(i) {
                    Ok(_) => assert_eq!(c.hand().len(), len - 1),
                    Err(e) => {
                        assert_eq!(e, ReturnError::InvalidIndex { index: i, len });
                        assert!(i >= len);
                    }
                }
            }
            assert_conserved(&c);
        }
    }
}

#[test]
fn test_pick_everything() {
    let mut c = Coordinator::default();
    let tiles = c.catalog().tiles().to_vec();
    for &t in &tiles {
        for _ in 0..c.catalog().capacity(t) {
            c.pick(t).unwrap();
        }
        assert_eq!(c.pick(t), Err(PickError::Unavailable(t)));
    }
    assert_eq!(c.hand().len(), 144);
    assert!(c.inventory_snapshot().values().all(|&n| n == 0));
    assert_conserved(&c);

    while !c.hand().is_empty() {
        c.return_at(0).unwrap();
    }
    assert_eq!(c.inventory_snapshot(), Coordinator::default().inventory_snapshot());
}

#[test]
fn test_exhaustion_scenario() {
    let mut c = Coordinator::new(Catalog::standard());
    let (ch, rx) = EventChannel::pair();
    c.add_listener(Box::new(ch));
    let b1 = tile("b1");

    let mut remains = vec![c.remaining(b1)];
    for _ in 0..4 {
        c.pick(b1).unwrap();
        remains.push(c.remaining(b1));
    }
    assert_eq!(remains, vec![4, 3, 2, 1, 0]);
    assert_eq!(c.hand_entries(), vec![b1, b1, b1, b1]);

    let n_events = rx.try_iter().count();
    assert_eq!(n_events, 8);

    assert_eq!(c.pick(b1), Err(PickError::Unavailable(b1)));
    assert_eq!(c.remaining(b1), 0);
    assert_eq!(c.hand().len(), 4);
    assert_eq!(rx.try_iter().count(), 0);
}

#[test]
fn test_store_events_are_forwarded() {
    use mahjong_request::{HandAssembly, TileInventory};

    let mut inv = TileInventory::new(Catalog::standard());
    let (ch, inv_rx) = EventChannel::pair();
    inv.add_listener(Box::new(ch));
    let mut hand = HandAssembly::new();
    let (ch, hand_rx) = EventChannel::pair();
    hand.add_listener(Box::new(ch));

    let mut c = Coordinator::from_parts(inv, hand).unwrap();
    c.pick(tile("fo")).unwrap();
    c.return_at(0).unwrap();

    let inv_events: Vec<Event> = inv_rx.try_iter().collect();
    assert_eq!(
        inv_events,
        vec![
            Event::used(tile("fo"), 0),
            Event::depleted(tile("fo")),
            Event::restored(tile("fo"), 1),
        ]
    );
    let hand_events: Vec<Event> = hand_rx.try_iter().collect();
    assert_eq!(
        hand_events,
        vec![Event::hand_changed(vec![tile("fo")]), Event::hand_changed(vec![])]
    );
}

#[test]
fn test_request_from_settings() {
    let settings = Settings::from_json_str(
        r#"{"request": {"player_wind": "NORTH", "winning_tile_origin": "Discard"}}"#,
    )
    .unwrap();
    let mut c = Coordinator::from_settings(&settings);
    for s in tiles_from_string("b1 b2 b3 dr dr dr").unwrap() {
        c.pick(s).unwrap();
    }
    c.return_at(4).unwrap();

    let json: serde_json::Value = serde_json::from_str(&c.request().to_json().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "concealed": ["b1", "b2", "b3", "dr", "dr"],
            "concealed_kong": [],
            "melded": [],
            "winning_tile": "",
            "prevalent_wind": "EAST",
            "player_wind": "NORTH",
            "winning_tile_origin": "Discard",
            "last_tile_situation": "Not Last Tile Situation",
        })
    );
}
