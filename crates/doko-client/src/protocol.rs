//! Classification of inbound lobby frames and builders for outbound ones.

use doko_core::game::machine::{DeclaredContract, SpecializedContract};
use doko_core::model::action::Action;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("missing field {0:?}")]
    MissingField(&'static str),
}

/// One message from the lobby server.
#[derive(Debug)]
pub enum Inbound {
    /// The core must submit a declared contract.
    Declare,
    /// The core must submit a specialized contract.
    Specialize,
    /// The core must submit a card or bid.
    Play,
    /// An action happened at the table.
    Observe(Action),
    /// A merge patch for the local view of the lobby state.
    StatePatch(Value),
    /// The server reported an error; nothing to do.
    ServerError(Value),
}

pub fn parse_inbound(raw: &str) -> Result<Inbound, ProtocolError> {
    let value: Value = serde_json::from_str(raw)?;
    if value.get("error").is_some() {
        return Ok(Inbound::ServerError(value));
    }
    let Some(command) = value.get("command") else {
        return Ok(Inbound::StatePatch(value));
    };
    let Some(command) = command.as_str() else {
        return Err(ProtocolError::MissingField("command"));
    };
    match command {
        "declare" => Ok(Inbound::Declare),
        "specialize" => Ok(Inbound::Specialize),
        "play" => Ok(Inbound::Play),
        "observe" => {
            let action = value
                .get("action")
                .ok_or(ProtocolError::MissingField("action"))?;
            Ok(Inbound::Observe(serde_json::from_value(action.clone())?))
        }
        other => Err(ProtocolError::UnknownCommand(other.to_string())),
    }
}

/// RFC 7396 merge patch, the shape the lobby uses for state updates.
pub fn merge_patch(target: &mut Value, patch: Value) {
    let Value::Object(patch) = patch else {
        *target = patch;
        return;
    };
    if !target.is_object() {
        *target = json!({});
    }
    let map = target.as_object_mut().expect("target was made an object");
    for (key, value) in patch {
        if value.is_null() {
            map.remove(&key);
        } else {
            merge_patch(map.entry(key).or_insert(Value::Null), value);
        }
    }
}

pub fn create_table(name: &str) -> Value {
    json!({"command": "create_table", "name": name})
}

pub fn join_table(name: &str) -> Value {
    json!({"command": "join_table", "name": name})
}

pub fn take_seat(seat: usize) -> Value {
    json!({"command": "take_seat", "seat": seat})
}

pub fn choose_declared(contract: &DeclaredContract) -> Value {
    json!({"command": "choose", "declared_contract": contract})
}

pub fn choose_specialized(contract: &SpecializedContract) -> Value {
    json!({"command": "choose", "specialized_contract": contract})
}

pub fn play(action: &Action) -> Value {
    json!({"command": "play", "action": action})
}

#[cfg(test)]
mod tests {
    use super::{merge_patch, parse_inbound, play, Inbound, ProtocolError};
    use doko_core::model::action::Action;
    use doko_core::model::card::Card;
    use doko_core::model::face::Face;
    use doko_core::model::player::Seat;
    use doko_core::model::suit::Suit;
    use serde_json::json;

    #[test]
    fn commands_parse() {
        assert!(matches!(
            parse_inbound(r#"{"command": "declare"}"#),
            Ok(Inbound::Declare)
        ));
        assert!(matches!(
            parse_inbound(r#"{"command": "specialize"}"#),
            Ok(Inbound::Specialize)
        ));
        assert!(matches!(
            parse_inbound(r#"{"command": "play"}"#),
            Ok(Inbound::Play)
        ));
    }

    #[test]
    fn observe_carries_an_action() {
        let raw = r#"{"command": "observe", "action": {"color": "hearts", "face": "ten", "player": 2}}"#;
        let Ok(Inbound::Observe(action)) = parse_inbound(raw) else {
            panic!("expected an observation");
        };
        assert_eq!(action, Action::play(Seat::Third, Card::new(Suit::Hearts, Face::Ten)));
    }

    #[test]
    fn frames_without_a_command_are_patches() {
        assert!(matches!(
            parse_inbound(r#"{"tables": []}"#),
            Ok(Inbound::StatePatch(_))
        ));
    }

    #[test]
    fn malformed_frames_are_errors_not_panics() {
        assert!(matches!(
            parse_inbound("{nope"),
            Err(ProtocolError::Json(_))
        ));
        assert!(matches!(
            parse_inbound(r#"{"command": "dance"}"#),
            Err(ProtocolError::UnknownCommand(_))
        ));
        assert!(matches!(
            parse_inbound(r#"{"command": "observe"}"#),
            Err(ProtocolError::MissingField("action"))
        ));
    }

    #[test]
    fn merge_patch_follows_rfc_7396() {
        let mut state = json!({"a": {"b": 1, "c": 2}, "d": 3});
        merge_patch(&mut state, json!({"a": {"b": 9, "c": null}, "e": 4}));
        assert_eq!(state, json!({"a": {"b": 9}, "d": 3, "e": 4}));
    }

    #[test]
    fn play_frames_embed_the_action() {
        let frame = play(&Action::play(Seat::First, Card::new(Suit::Clubs, Face::Ace)));
        assert_eq!(
            frame,
            json!({"command": "play", "action": {"color": "clubs", "face": "ace", "player": 0}})
        );
    }
}
