use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn script_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("eco_core_cli").unwrap();
    cmd.env("ECO_CORE_HOME", home.path())
        .env("ECO_CORE_CLI_SCRIPT", "1");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = TempDir::new().unwrap();
    let input = "\
group create Trip
member add Alice
member add Bob
expense add 60 Alice Dinner --split Bob
settle
exit
";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Created group `Trip`"))
        .stdout(contains("Bob pays Alice R60.00"));

    let json =
        std::fs::read_to_string(home.path().join("groups").join("trip.json")).unwrap();
    assert!(json.contains("\"Trip\""));
    assert!(json.contains("Dinner"));
}

#[test]
fn session_survives_between_runs() {
    let home = TempDir::new().unwrap();

    script_command(&home)
        .write_stdin("group create Flat\nmember add Alice\nexit\n")
        .assert()
        .success();

    // Second run resumes the active group without selecting it again.
    script_command(&home)
        .write_stdin("member add Bob\nmember list\nexit\n")
        .assert()
        .success()
        .stdout(contains("Alice"))
        .stdout(contains("Bob"));
}

#[test]
fn settled_group_reports_clean_state() {
    let home = TempDir::new().unwrap();
    let input = "\
group create Even
member add Alice
member add Bob
expense add 50 Alice Dinner --split Bob
payment record Bob Alice 50
settle
exit
";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Everyone is settled up!"));
}

#[test]
fn unknown_commands_suggest_a_fix() {
    let home = TempDir::new().unwrap();

    script_command(&home)
        .write_stdin("settel\nexit\n")
        .assert()
        .success()
        .stdout(contains("Did you mean `settle`?"));
}

#[test]
fn split_sum_mismatch_is_reported() {
    let home = TempDir::new().unwrap();
    let input = "\
group create Strict
member add Alice
member add Bob
expense add 50 Alice Dinner --split Bob
expense splits 1 Bob=20
exit
";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stderr(contains("Integrity violation"));
}
