mod support;

use predicates::str::contains;
use support::TestProject;
use teamdesk::error::exit_codes;

#[test]
fn protected_commands_require_login() {
    let project = TestProject::new();

    project
        .teamdesk()
        .args(["player", "list"])
        .assert()
        .code(exit_codes::UNAUTHORIZED)
        .stderr(contains("Login required"));

    let envelope = project.json(&["dashboard"]);
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["error"]["kind"], "unauthorized");
}

#[test]
fn bad_credentials_are_refused() {
    let project = TestProject::new();

    project
        .teamdesk()
        .args(["login", "--username", "admin", "--password", "nope"])
        .assert()
        .code(exit_codes::UNAUTHORIZED)
        .stderr(contains("Invalid Credentials"));

    assert!(!project.data_dir().join("session.json").exists());
}

#[test]
fn configured_credentials_are_used() {
    let project = TestProject::new();
    project
        .write_file(
            ".teamdesk.toml",
            "[auth]\nusername = \"coach\"\npassword = \"gg\"\n",
        )
        .expect("write config");

    project
        .teamdesk()
        .args(["login", "--username", "admin", "--password", "admin"])
        .assert()
        .code(exit_codes::UNAUTHORIZED);
    project
        .teamdesk()
        .args(["login", "--username", "coach", "--password", "gg"])
        .assert()
        .success();

    let envelope = project.json(&["whoami"]);
    assert_eq!(envelope["data"]["username"], "coach");
}

#[test]
fn renamed_account_invalidates_old_session() {
    let project = TestProject::new();
    project.login();
    project
        .teamdesk()
        .args(["player", "list"])
        .assert()
        .success();

    project
        .write_file(
            ".teamdesk.toml",
            "[auth]\nusername = \"coach\"\npassword = \"gg\"\n",
        )
        .expect("write config");

    project
        .teamdesk()
        .args(["player", "list"])
        .assert()
        .code(exit_codes::UNAUTHORIZED)
        .stderr(contains("Login required"));
}

#[test]
fn roster_and_tasks_round_trip_through_files() {
    let project = TestProject::new();
    project.login();

    let added = project.json(&[
        "player",
        "add",
        "--name",
        "Player1",
        "--role",
        "DPS",
        "--availability",
        "2023-05-10 09:00,2023-05-10 11:00",
    ]);
    assert_eq!(added["status"], "success");
    assert_eq!(added["data"]["id"], 1);

    let task = project.json(&[
        "task",
        "add",
        "--task",
        "Scout",
        "--assigned-to",
        "Player1",
        "--due-date",
        "2023-05-11",
    ]);
    assert_eq!(task["data"]["id"], 1);

    project
        .teamdesk()
        .args([
            "task",
            "add",
            "--task",
            "Scout",
            "--assigned-to",
            "Ghost",
            "--due-date",
            "2023-05-11",
        ])
        .assert()
        .code(exit_codes::USER_ERROR)
        .stderr(contains("Assigned player does not exist."));

    let players = project.read_lines("players.jsonl");
    assert_eq!(players.len(), 1);
    assert_eq!(players[0]["name"], "Player1");
    assert_eq!(
        players[0]["availabilities"][0]["start"],
        "2023-05-10 09:00"
    );
    assert_eq!(project.read_lines("tasks.jsonl").len(), 1);

    let events = project.json(&["events"]);
    let events = events["data"].as_array().expect("events array");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["title"], "Player1 - DPS");
    assert_eq!(events[1]["title"], "Scout");
}

#[test]
fn invalid_player_is_not_written() {
    let project = TestProject::new();
    project.login();

    project
        .teamdesk()
        .args([
            "player",
            "add",
            "--name",
            "Al",
            "--role",
            "DPS",
            "--availability",
            "2023-05-10,2023-05-11",
        ])
        .assert()
        .code(exit_codes::USER_ERROR)
        .stderr(contains("at least 3 characters"));

    project
        .teamdesk()
        .args(["player", "add", "--name", "Alice", "--role", "DPS"])
        .assert()
        .code(exit_codes::USER_ERROR)
        .stderr(contains("All fields are required."));

    assert!(project.read_lines("players.jsonl").is_empty());
}

#[test]
fn edit_and_remove_unknown_ids_report_not_found() {
    let project = TestProject::new();
    project.login();

    let envelope = project.json(&["player", "edit", "7", "--role", "Tank"]);
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["error"]["kind"], "not_found");
    assert_eq!(envelope["error"]["details"]["id"], 7);

    project
        .teamdesk()
        .args(["match", "rm", "3"])
        .assert()
        .code(exit_codes::USER_ERROR)
        .stderr(contains("Match not found: 3"));
}

#[test]
fn seeded_team_shows_analytics() {
    let project = TestProject::new();
    project.login();

    let init = project.json(&["init", "--seed"]);
    assert_eq!(init["data"]["seeded"]["players"], 2);
    assert_eq!(init["data"]["seeded"]["matches"], 3);

    let dashboard = project.json(&["dashboard"]);
    assert_eq!(dashboard["data"]["players"], 2);
    assert_eq!(dashboard["data"]["matches"], 3);
    let pct = dashboard["data"]["win_percentage"].as_f64().expect("pct");
    assert!((pct - 200.0 / 3.0).abs() < 1e-9);

    project
        .teamdesk()
        .args(["match", "edit", "2", "--result", "WIN"])
        .assert()
        .success();

    let analytics = project.json(&["analytics"]);
    assert_eq!(analytics["data"]["win_percentage"], 100.0);

    let week = project.json(&["events", "--week", "2023-05-08"]);
    assert_eq!(week["data"].as_array().expect("events").len(), 4);
    let later = project.json(&["events", "--week", "2023-05-15"]);
    assert!(later["data"].as_array().expect("events").is_empty());
}

#[test]
fn logout_ends_the_session() {
    let project = TestProject::new();
    project.login();

    project
        .teamdesk()
        .args(["task", "list"])
        .assert()
        .success();
    project.teamdesk().arg("logout").assert().success();
    project
        .teamdesk()
        .args(["task", "list"])
        .assert()
        .code(exit_codes::UNAUTHORIZED);
}
