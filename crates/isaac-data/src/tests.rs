use crate::*;
use isaac_core::{DecodeError, SignedReal};
use isaac_sim::Body;

/// `-1` as a field element
const MINUS_ONE: &str =
    "3618502788666131213697322783095070105623107215331596699873092056135872020481";

/// `π/2 · 10^20` as base64
const QUARTER_TURN: &str = "CIPq9a2t0mvj";

fn body(x: &str, y: &str) -> RawBody {
    RawBody { q: RawVec2 { x: x.into(), y: y.into() } }
}

fn raw_state(block_number: u64, planet_x: &str, valid_to: Option<u64>) -> RawMacroState {
    RawMacroState {
        block_number,
        dynamics: RawDynamics {
            sun0: body("0", "0"),
            sun1: body("100000000000000000000", MINUS_ONE),
            sun2: body("0", "0"),
            planet: body(planet_x, "0"),
        },
        phi: QUARTER_TURN.to_string(),
        chain: Some(ChainMeta { valid_from: Some(block_number), valid_to }),
    }
}

#[test]
fn test_decode_macro_state() {
    let state = decode_macro_state(&raw_state(5, "250000000000000000000", None)).unwrap();

    assert_eq!(state.block_number, 5);
    assert_eq!(state.position(Body::Sun1).x, SignedReal::from_integer(1));
    assert_eq!(state.position(Body::Sun1).y, SignedReal::from_integer(-1));
    assert_eq!(state.position(Body::Planet).x, "2.5".parse::<SignedReal>().unwrap());
    assert!((state.orientation_degrees() - 90.0).abs() < 1e-9);
}

#[test]
fn test_feed_document_parses() {
    let json = r#"{
        "macro_states": [
            {
                "_id": "abc",
                "block_number": 12,
                "phi": "AA==",
                "dynamics": {
                    "sun0": {"q": {"x": "0", "y": "0"}, "qd": {"x": "1", "y": "2"}},
                    "sun1": {"q": {"x": 0, "y": 0}},
                    "sun2": {"q": {"x": "0x0", "y": "0"}},
                    "planet": {"q": {"x": "50000000000000000000", "y": "0"}}
                },
                "_chain": {"valid_from": 12, "valid_to": null}
            }
        ]
    }"#;

    let feed = MacroStateFeed::from_json(json).unwrap();
    let history = decode_history(&feed.history()).unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].position(Body::Planet).x.to_string(), "0.5");
    assert_eq!(history[0].orientation_degrees(), 0.0);
}

#[test]
fn test_history_filters_orders_and_dedups() {
    let feed = MacroStateFeed {
        macro_states: vec![
            raw_state(1, "0", None),
            raw_state(3, "0", Some(4)),
            raw_state(3, "100000000000000000000", None),
            raw_state(2, "0", None),
            raw_state(3, "200000000000000000000", None),
        ],
    };

    let history = feed.history();
    let blocks: Vec<u64> = history.iter().map(|s| s.block_number).collect();
    assert_eq!(blocks, vec![3, 2, 1]);

    // The first current row for block 3 wins
    let decoded = decode_history(&history).unwrap();
    assert_eq!(decoded[0].position(Body::Planet).x, SignedReal::from_integer(1));
}

#[test]
fn test_one_bad_value_fails_the_batch() {
    let mut bad = raw_state(2, "0", None);
    bad.dynamics.planet.q.y = RawFelt::Text("1.5".to_string());

    let batch = vec![raw_state(3, "0", None), bad, raw_state(1, "0", None)];
    assert!(matches!(
        decode_history(&batch),
        Err(DecodeError::MalformedFieldElement { .. })
    ));
}

#[test]
fn test_bad_orientation_fails() {
    let mut bad = raw_state(2, "0", None);
    bad.phi = String::new();
    assert!(matches!(
        decode_macro_state(&bad),
        Err(DecodeError::MalformedAngleEncoding(_))
    ));
}

/// 200 bytes of `0xff`: decodes as base64 but has no finite rotation
fn oversized_phi() -> String {
    format!("{}8=", "/".repeat(266))
}

#[test]
fn test_oversized_orientation_fails() {
    let mut bad = raw_state(2, "0", None);
    bad.phi = oversized_phi();
    assert!(matches!(
        decode_macro_state(&bad),
        Err(DecodeError::MalformedAngleEncoding(_))
    ));

    let batch = vec![raw_state(3, "0", None), bad];
    assert!(decode_history(&batch).is_err());
}

#[test]
fn test_out_of_field_value_fails() {
    let mut bad = raw_state(2, "0", None);
    bad.dynamics.sun2.q.x = RawFelt::Text(
        "3618502788666131213697322783095070105623107215331596699973092056135872020481".to_string(),
    );
    assert!(decode_macro_state(&bad).is_err());
}

#[test]
fn test_impulse_feed() {
    let json = r#"{
        "impulses": [
            {
                "block_number": 4,
                "most_recent_planet_q": {"x": "100000000000000000000", "y": "0"},
                "impulse_applied": {"x": "1000000000000000000", "y": "0"},
                "_chain": {"valid_from": 4, "valid_to": null}
            },
            {
                "block_number": 9,
                "most_recent_planet_q": {"x": "0", "y": "0"},
                "impulse_applied": {"x": "0", "y": "0"},
                "_chain": {"valid_from": 9, "valid_to": 10}
            },
            {
                "block_number": 6,
                "most_recent_planet_q": {"x": "0", "y": "0"},
                "impulse_applied": {"x": "0", "y": "0"}
            }
        ]
    }"#;

    let current = ImpulseFeed::from_json(json).unwrap().current();
    let impulses = decode_impulses(&current).unwrap();

    let blocks: Vec<u64> = impulses.iter().map(|i| i.block_number).collect();
    assert_eq!(blocks, vec![6, 4]);
    assert_eq!(impulses[1].applied_delta_v.x.to_string(), "0.01");
}

#[test]
fn test_save_and_load() {
    let dir = std::env::temp_dir().join(format!("isaac-data-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("macro_state.json");

    let feed = MacroStateFeed { macro_states: vec![raw_state(1, "0", None)] };
    feed.save(&path).unwrap();

    let loaded = MacroStateFeed::load(&path).unwrap();
    assert_eq!(loaded.macro_states, feed.macro_states);

    std::fs::remove_dir_all(&dir).unwrap();
}
