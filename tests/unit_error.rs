use std::path::PathBuf;

use teamdesk::error::{exit_codes, Error, JsonError};
use teamdesk::model::RecordKind;
use teamdesk::validate::ValidationError;

#[test]
fn exit_codes_map_correctly() {
    let user = Error::InvalidArgument("bad".to_string());
    assert_eq!(user.exit_code(), exit_codes::USER_ERROR);

    let invalid = Error::from(ValidationError::UnknownAssignee);
    assert_eq!(invalid.exit_code(), exit_codes::USER_ERROR);

    let missing = Error::NotFound {
        kind: RecordKind::Player,
        id: 9,
    };
    assert_eq!(missing.exit_code(), exit_codes::USER_ERROR);

    assert_eq!(Error::Unauthorized.exit_code(), exit_codes::UNAUTHORIZED);
    assert_eq!(Error::InvalidCredentials.exit_code(), exit_codes::UNAUTHORIZED);

    let op = Error::LockFailed(PathBuf::from(".teamdesk/team.lock"));
    assert_eq!(op.exit_code(), exit_codes::OPERATION_FAILED);

    let persist = Error::Persistence {
        path: PathBuf::from("players.jsonl"),
        source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
    };
    assert_eq!(persist.exit_code(), exit_codes::OPERATION_FAILED);
    assert!(persist.to_string().contains("players.jsonl"));
}

#[test]
fn validation_error_shows_its_message() {
    let err = Error::from(ValidationError::NameOrRoleTooShort);
    assert_eq!(
        err.to_string(),
        "Name and Role must be at least 3 characters long."
    );
}

#[test]
fn json_error_includes_code_and_details() {
    let err = Error::NotFound {
        kind: RecordKind::Task,
        id: 42,
    };
    let json = JsonError::from(&err);
    assert_eq!(json.code, exit_codes::USER_ERROR);
    assert_eq!(json.error, "Task not found: 42");
    assert_eq!(
        json.details,
        Some(serde_json::json!({ "kind": "task", "id": 42 }))
    );
}
