mod common;

use chrono::NaiveDate;
use eco_core::{
    core::services::{ExpenseService, MemberService},
    core::GroupManager,
    storage::JsonStorage,
};
use tempfile::TempDir;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, 2).unwrap()
}

#[test]
fn create_save_load_round_trip() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().to_path_buf();

    {
        let storage = JsonStorage::new(Some(base.clone())).unwrap();
        let mut manager = GroupManager::new(Box::new(storage));
        manager.create("Road Trip").unwrap();
        manager
            .with_current_mut(|group| {
                MemberService::add(group, "Alice")?;
                MemberService::add(group, "Bob")?;
                ExpenseService::add(
                    group,
                    "Petrol",
                    80.0,
                    date(),
                    "Alice",
                    &["Bob".to_string()],
                )?;
                Ok(())
            })
            .unwrap();
    }

    // Fresh manager over the same directory sees the persisted group.
    let storage = JsonStorage::new(Some(base)).unwrap();
    let mut manager = GroupManager::new(Box::new(storage));
    assert_eq!(manager.last_group().unwrap().as_deref(), Some("Road Trip"));

    manager.load("Road Trip").unwrap();
    manager
        .with_current(|group| {
            assert_eq!(group.name, "Road Trip");
            assert_eq!(group.members.len(), 2);
            assert_eq!(group.expense_count(), 1);
            assert_eq!(group.expenses[0].splits.len(), 1);
        })
        .unwrap();
}

#[test]
fn duplicate_group_creation_conflicts() {
    let (mut manager, _config) = common::setup_test_env();
    manager.create("Flatmates").unwrap();
    assert!(manager.create("Flatmates").is_err());
}

#[test]
fn deleting_the_active_group_clears_the_session() {
    let (mut manager, _config) = common::setup_test_env();
    manager.create("Doomed").unwrap();
    assert_eq!(manager.current_name(), Some("Doomed"));

    manager.delete("Doomed").unwrap();
    assert_eq!(manager.current_name(), None);
    assert_eq!(manager.last_group().unwrap(), None);
    assert!(manager.load("Doomed").is_err());
}

#[test]
fn list_groups_skips_foreign_files() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().to_path_buf();
    let storage = JsonStorage::new(Some(base.clone())).unwrap();
    let mut manager = GroupManager::new(Box::new(storage));
    manager.create("Alpha").unwrap();
    manager.create("Beta").unwrap();

    // Not a group file; listing must not choke on it.
    std::fs::write(base.join("groups").join("junk.json"), "{not json").unwrap();

    assert_eq!(manager.list().unwrap(), vec!["Alpha", "Beta"]);
}

#[test]
fn saves_leave_no_temp_files_behind() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().to_path_buf();
    let storage = JsonStorage::new(Some(base.clone())).unwrap();
    let mut manager = GroupManager::new(Box::new(storage));
    manager.create("Atomic").unwrap();
    manager
        .with_current_mut(|group| {
            MemberService::add(group, "Alice")?;
            Ok(())
        })
        .unwrap();
    manager.save().unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(base.join("groups"))
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn group_names_slug_to_stable_file_names() {
    let (mut manager, _config) = common::setup_test_env();
    manager.create("Summer Holiday 2024!").unwrap();
    let path = manager.storage().group_path("Summer Holiday 2024!");
    assert!(path.ends_with("summer-holiday-2024-.json"));
    assert!(path.exists());

    // Lookup by the display name keeps working.
    manager.load("Summer Holiday 2024!").unwrap();
}
