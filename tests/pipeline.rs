use hand_history::history::{HandHistory, ParseError, Stage};
use hand_history::room::FullTilt;

const HAND: &str = "\
Full Tilt Poker Game #33286946297: MiniFTOPS Main Event (255463026), Table 22 - NL Hold'em - 50/100 - [20:01:30 ET - 2014/06/29]
Seat 1: alice (4,500)
Seat 2: bogdan (5,500)
The button is in seat #1
*** HOLE CARDS ***
Dealt to alice [7c 7d]
bogdan folds
*** SUMMARY ***
Total pot 150 | Rake 0
Seat 1: alice collected (150)
Seat 2: bogdan folded before the Flop
";

#[test]
fn header_parse_is_idempotent() {
    let room = FullTilt::new();
    let mut hand = HandHistory::new(HAND);

    hand.parse_header(&room).unwrap();
    assert!(hand.header_parsed());
    assert!(!hand.parsed());
    let ident = hand.ident.clone();
    let date = hand.date;

    hand.parse_header(&room).unwrap();
    assert_eq!(hand.ident, ident);
    assert_eq!(hand.date, date);
}

#[test]
fn header_parse_leaves_body_untouched() {
    let room = FullTilt::new();
    let mut hand = HandHistory::new(HAND);
    hand.parse_header(&room).unwrap();
    assert!(hand.players.is_empty());
    assert!(hand.flop.is_none());
    assert!(hand.winners.is_empty());
}

#[test]
fn full_parse_does_not_rerun_header_parse() {
    let room = FullTilt::new();

    let mut split_call = HandHistory::new(HAND);
    split_call.parse_header(&room).unwrap();
    let ident = split_call.ident.clone();
    let date = split_call.date;
    split_call.parse(&room).unwrap();

    let mut single_call = HandHistory::new(HAND);
    single_call.parse(&room).unwrap();

    assert_eq!(split_call.ident, ident);
    assert_eq!(split_call.date, date);
    assert_eq!(split_call, single_call);
}

#[test]
fn reparse_is_a_no_op() {
    let room = FullTilt::new();
    let mut hand = HandHistory::new(HAND);
    hand.parse(&room).unwrap();
    assert!(hand.parsed());

    let snapshot = hand.clone();
    hand.parse(&room).unwrap();
    assert_eq!(hand, snapshot);
}

#[test]
fn garbage_header_is_a_hard_failure() {
    let room = FullTilt::new();
    let mut hand = HandHistory::new("PokerStars Hand #1: not a full tilt hand");
    let err = hand.parse(&room).unwrap_err();
    assert!(matches!(err, ParseError::MalformedHeader { .. }));
    assert!(!hand.header_parsed());
    assert!(!hand.parsed());
}

#[test]
fn unseated_hero_propagates() {
    let text = HAND.replace("Dealt to alice", "Dealt to stranger");
    let room = FullTilt::new();
    let mut hand = HandHistory::new(&text);
    let err = hand.parse(&room).unwrap_err();
    assert_eq!(err, ParseError::HeroNotFound("stranger".to_string()));
    assert!(!hand.parsed());
}

#[test]
fn missing_button_line_names_the_stage() {
    let text = HAND.replace("The button is in seat #1\n", "");
    let room = FullTilt::new();
    let mut hand = HandHistory::new(&text);
    let err = hand.parse(&room).unwrap_err();
    match err {
        ParseError::MalformedLine { stage, line, .. } => {
            assert_eq!(stage, Stage::Button);
            assert!(line.starts_with("Seat 2"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn errors_render_with_stage_and_fragment() {
    let err = ParseError::MalformedLine {
        stage: Stage::Pot,
        index: 17,
        line: "Total pot ???".to_string(),
    };
    assert_eq!(err.to_string(), "stage pot: malformed line at fragment 17: 'Total pot ???'");
}
