use buddy_protocol::{
    AiHintResponse, DictionaryEntry, Difficulty, GameMode, GameStatus, ProtocolError,
    daily_share_text, decode_reply, first_definition,
};

const RANDOM_START: &str = r#"{
    "mode": "random",
    "category": "Animals",
    "difficulty": "medium",
    "masked_word": "_ _ _ _ _ _",
    "attempts_left": 6,
    "max_attempts": 6,
    "guesses": [],
    "game_over": false,
    "win": false,
    "hint": "Lives in rivers and holds hands while sleeping",
    "learning": {
        "category": "Animals",
        "definition": "",
        "fun_fact": "Otters have the densest fur of any animal.",
        "subject": "Science",
        "grade_band": "3-5",
        "hint": "Lives in rivers and holds hands while sleeping"
    }
}"#;

const DAILY_LOSS: &str = r#"{
    "mode": "daily",
    "date": "2026-10-19",
    "category": "Fruits",
    "masked_word": "_ A _ A _ A",
    "attempts_left": 0,
    "guesses": ["A", "E", "I", "O", "U", "S", "T"],
    "game_over": true,
    "win": false,
    "hint": "Yellow and curved",
    "learning": null,
    "streak_current": 0,
    "streak_best": 4,
    "word": "BANANA"
}"#;

#[test]
fn decodes_random_start_payload() {
    let status: GameStatus = decode_reply(200, RANDOM_START.as_bytes()).unwrap();

    assert_eq!(status.mode, GameMode::Random);
    assert_eq!(status.difficulty, Some(Difficulty::Medium));
    assert_eq!(status.attempts_left, 6);
    assert!(status.is_fresh());
    assert!(status.word.is_none());

    let learning = status.learning.expect("learning info present");
    assert!(learning.has_fact());
    assert_eq!(learning.subject_line().as_deref(), Some("Science • 3-5"));
}

#[test]
fn decodes_finished_daily_payload() {
    let status: GameStatus = decode_reply(200, DAILY_LOSS.as_bytes()).unwrap();

    assert_eq!(status.mode, GameMode::Daily);
    assert!(status.is_lost());
    assert_eq!(status.word.as_deref(), Some("BANANA"));
    assert!(status.is_letter_revealed('a'));
    assert!(!status.is_letter_revealed('E'));
    assert!(status.has_guessed('t'));
    assert_eq!(status.learning, None);
}

#[test]
fn daily_share_text_matches_clipboard_format() {
    let status: GameStatus = decode_reply(200, DAILY_LOSS.as_bytes()).unwrap();
    let text = daily_share_text(&status, "http://127.0.0.1:5000").unwrap();

    assert_eq!(
        text,
        "Hangman Daily 2026-10-19\nCategory: Fruits\n💔💔💔💔💔💔 💀\nStreak: 0\nPlay: http://127.0.0.1:5000"
    );
}

#[test]
fn share_text_is_daily_only() {
    let status: GameStatus = decode_reply(200, RANDOM_START.as_bytes()).unwrap();
    assert!(daily_share_text(&status, "http://localhost").is_none());
}

#[test]
fn error_body_becomes_rejection() {
    let result: Result<GameStatus, ProtocolError> =
        decode_reply(400, br#"{"error": "Game is over"}"#);
    match result {
        Err(ProtocolError::Rejected { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Game is over");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn malformed_success_body_is_a_decode_error() {
    let result: Result<GameStatus, ProtocolError> = decode_reply(200, b"{\"mode\":\"random\"}");
    assert!(matches!(result, Err(ProtocolError::Decode(_))));
}

#[test]
fn ai_hint_reply_variants() {
    let ok: AiHintResponse =
        decode_reply(200, br#"{"success": true, "hint": "Think of rivers"}"#).unwrap();
    assert_eq!(ok.into_result(), Ok("Think of rivers".to_string()));

    let failed: AiHintResponse =
        decode_reply(200, br#"{"success": false, "error": "Claude API not configured"}"#)
            .unwrap();
    assert_eq!(
        failed.into_result(),
        Err("Claude API not configured".to_string())
    );
}

#[test]
fn dictionary_reply_yields_first_definition() {
    let entries: Vec<DictionaryEntry> = decode_reply(
        200,
        r#"[{"word":"banana","phonetic":"/bəˈnɑːnə/","meanings":[
            {"partOfSpeech":"noun","definitions":[
                {"definition":"An elongated curved tropical fruit.","synonyms":[]},
                {"definition":"The tree bearing it."}
            ]}
        ]}]"#
            .as_bytes(),
    )
    .unwrap();
    assert_eq!(
        first_definition(&entries),
        Some("An elongated curved tropical fruit.")
    );
}
