use super::*;
use crate::error::CourierError;

#[test]
fn test_decode_message_update() {
    let json = r#"{
        "update_id": 10,
        "message": {
            "message_id": 5,
            "from": {"id": 42, "is_bot": false, "first_name": "Ann"},
            "date": 1700000000,
            "chat": {"id": -1001, "type": "supergroup", "title": "Team"},
            "text": "/start now",
            "entities": [{"type": "bot_command", "offset": 0, "length": 6}]
        }
    }"#;
    let update: Update = serde_json::from_str(json).unwrap();
    assert_eq!(update.update_id, 10);
    let UpdateKind::Message(msg) = update.kind() else {
        panic!("expected a message update");
    };
    assert_eq!(msg.message_id, 5);
    assert_eq!(msg.from.as_ref().unwrap().first_name, "Ann");
    assert!(msg.chat.is_group());
    assert_eq!(msg.text.as_deref(), Some("/start now"));
    assert_eq!(msg.entities[0].kind, "bot_command");
    assert!(msg.caption.is_none());
    assert!(msg.document.is_none());
    assert_eq!(update.chat_id(), Some(-1001));
}

#[test]
fn test_decode_callback_only_update() {
    let json = r#"{
        "update_id": 11,
        "callback_query": {
            "id": "cbq-1",
            "from": {"id": 7, "first_name": "Bo"},
            "chat_instance": "ci",
            "data": "vote:yes",
            "message": {"message_id": 99, "chat": {"id": 3, "type": "private"}}
        }
    }"#;
    let update: Update = serde_json::from_str(json).unwrap();
    assert!(update.message.is_none());
    match update.kind() {
        UpdateKind::CallbackQuery(q) => {
            assert_eq!(q.id, "cbq-1");
            assert_eq!(q.data, "vote:yes");
            assert_eq!(q.from.id, 7);
        }
        other => panic!("expected callback query, got {other:?}"),
    }
    assert_eq!(update.chat_id(), Some(3));
}

#[test]
fn test_decode_unknown_update_kind() {
    let update: Update = serde_json::from_str(r#"{"update_id": 1, "poll": {"id": "p"}}"#).unwrap();
    assert_eq!(update.kind(), UpdateKind::Unknown);
    assert_eq!(update.chat_id(), None);
}

#[test]
fn test_decode_rejects_non_object() {
    assert!(serde_json::from_str::<Update>("42").is_err());
    assert!(serde_json::from_str::<Update>("not json").is_err());
}

#[test]
fn test_entity_extract_counts_utf16_units() {
    // The emoji is one char but two UTF-16 units.
    let text = "hi \u{1F600} @bob";
    let mention = MessageEntity::new("mention", 6, 4);
    assert_eq!(mention.extract(text).as_deref(), Some("@bob"));
    assert_eq!(utf16_len(text), 10);
}

#[test]
fn test_entity_extract_out_of_range() {
    let e = MessageEntity::new("bold", 2, 10);
    assert_eq!(e.extract("short"), None);
    let negative = MessageEntity::new("bold", -1, 2);
    assert_eq!(negative.extract("short"), None);
}

#[test]
fn test_entity_serialization_omits_absent_fields() {
    let e = MessageEntity::new("bold", 0, 4);
    let json = serde_json::to_string(&e).unwrap();
    assert_eq!(json, r#"{"type":"bold","offset":0,"length":4}"#);
}

#[test]
fn test_decode_chat_member() {
    let json = r#"{
        "status": "administrator",
        "user": {"id": 1, "is_bot": true, "first_name": "Bot"},
        "custom_title": "Boss",
        "can_delete_messages": true
    }"#;
    let member: ChatMember = serde_json::from_str(json).unwrap();
    assert!(member.is_admin());
    assert_eq!(member.custom_title, "Boss");
    assert!(member.can_delete_messages);
    assert!(!member.can_pin_messages);
}

#[test]
fn test_envelope_success() {
    let json = r#"{"ok":true,"result":{"message_id":8,"chat":{"id":1,"type":"private"}}}"#;
    let env: MessageResponse = serde_json::from_str(json).unwrap();
    assert!(env.ok);
    assert_eq!(env.error_code, 0);
    assert_eq!(env.description, "");
    let msg = env.into_result().unwrap();
    assert_eq!(msg.message_id, 8);
}

#[test]
fn test_envelope_rejection() {
    let json = r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#;
    let env: MessageResponse = serde_json::from_str(json).unwrap();
    assert!(!env.ok);
    assert!(env.result.is_none());
    match env.into_result() {
        Err(CourierError::Rejected { code, description }) => {
            assert_eq!(code, 400);
            assert_eq!(description, "Bad Request: chat not found");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

/// Decodes with only the bounds the API client has.
fn decode_envelope<T: serde::de::DeserializeOwned>(json: &str) -> Envelope<T> {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_envelope_decodes_result_without_default() {
    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Pinned {
        id: i64,
    }

    let env: Envelope<Pinned> = decode_envelope(r#"{"ok": true, "result": {"id": 7}}"#);
    assert_eq!(env.result, Some(Pinned { id: 7 }));

    let env: Envelope<Pinned> =
        decode_envelope(r#"{"ok": false, "error_code": 403, "description": "Forbidden"}"#);
    assert!(env.result.is_none());
    assert_eq!(env.error_code, 403);
}

#[test]
fn test_envelope_bare_value_result() {
    let env: DefaultResponse = serde_json::from_str(r#"{"ok":true,"result":true}"#).unwrap();
    assert_eq!(env.result, Some(serde_json::Value::Bool(true)));
    let count: DefaultResponse = serde_json::from_str(r#"{"ok":true,"result":17}"#).unwrap();
    assert_eq!(count.into_result().unwrap(), serde_json::json!(17));
}

#[test]
fn test_envelope_log_string_is_json() {
    let env: DefaultResponse = serde_json::from_str(r#"{"ok":true,"result":true}"#).unwrap();
    assert_eq!(
        env.to_log_string(),
        r#"{"ok":true,"result":true,"error_code":0,"description":""}"#
    );
}

#[test]
fn test_input_media_is_tagged() {
    let media = InputMedia::Video(InputMediaVideo {
        media: "file-id".into(),
        caption: "clip".into(),
        supports_streaming: true,
        ..Default::default()
    });
    let value = serde_json::to_value(&media).unwrap();
    assert_eq!(value["type"], "video");
    assert_eq!(value["media"], "file-id");
    assert_eq!(value["caption"], "clip");
    assert_eq!(value["supports_streaming"], true);
    assert!(value.get("thumb").is_none());
}

#[test]
fn test_inline_button_constructors_set_one_action() {
    let buttons = [
        InlineKeyboardButton::url("Site", "https://example.com"),
        InlineKeyboardButton::callback("Yes", "y"),
        InlineKeyboardButton::switch_inline_query("Share", "q"),
        InlineKeyboardButton::switch_inline_query_current_chat("Here", "q"),
    ];
    for b in &buttons {
        assert_eq!(b.action_count(), 1, "{b:?}");
    }
    let json = serde_json::to_string(&buttons[1]).unwrap();
    assert_eq!(json, r#"{"text":"Yes","callback_data":"y"}"#);
}

#[test]
fn test_remove_and_force_reply_defaults() {
    assert!(ReplyKeyboardRemove::default().remove_keyboard);
    assert!(ForceReply::default().force_reply);
}

#[test]
fn test_chat_permissions_presets() {
    assert!(ChatPermissions::all().can_pin_messages);
    assert_eq!(ChatPermissions::none(), ChatPermissions::default());
}

#[test]
fn test_edit_result_accepts_message_or_flag() {
    let inline: EditResponse = serde_json::from_str(r#"{"ok":true,"result":true}"#).unwrap();
    assert_eq!(inline.result, Some(EditedMessage::Inline(true)));

    let edited: EditResponse =
        serde_json::from_str(r#"{"ok":true,"result":{"message_id":3,"chat":{"id":1}}}"#).unwrap();
    match edited.into_result().unwrap() {
        EditedMessage::Message(m) => assert_eq!(m.message_id, 3),
        other => panic!("expected message, got {other:?}"),
    }
}
