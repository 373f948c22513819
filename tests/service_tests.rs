use chrono::NaiveDate;
use eco_core::{
    core::services::{
        expense_service::ExpenseChanges, ExpenseService, MemberService, PaymentService,
        ServiceError,
    },
    domain::Group,
    settlement::{self, round_cents},
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn prepared_group() -> Group {
    let mut group = Group::new("Ski Trip");
    MemberService::add(&mut group, "Alice").unwrap();
    MemberService::add(&mut group, "Bob").unwrap();
    MemberService::add(&mut group, "Carol").unwrap();
    group
}

#[test]
fn duplicate_member_names_conflict() {
    let mut group = prepared_group();
    let err = MemberService::add(&mut group, "alice").unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[test]
fn blank_member_name_is_invalid() {
    let mut group = prepared_group();
    let err = MemberService::add(&mut group, "   ").unwrap_err();
    assert!(matches!(err, ServiceError::Invalid(_)));
}

#[test]
fn members_get_distinct_palette_colors() {
    let group = prepared_group();
    let colors: Vec<&str> = group
        .members
        .iter()
        .map(|m| m.color_or_default())
        .collect();
    assert_eq!(colors.len(), 3);
    assert_ne!(colors[0], colors[1]);
    assert_ne!(colors[1], colors[2]);
}

#[test]
fn renaming_keeps_names_unique() {
    let mut group = prepared_group();
    let bob = group.member_by_name("Bob").unwrap().id;

    let err = MemberService::rename(&mut group, bob, "Carol").unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    MemberService::rename(&mut group, bob, "Robert").unwrap();
    assert!(group.member_by_name("Bob").is_none());
    assert_eq!(group.member_by_name("Robert").unwrap().id, bob);
}

#[test]
fn removing_a_referenced_member_is_refused() {
    let mut group = prepared_group();
    ExpenseService::add(
        &mut group,
        "Lift passes",
        90.0,
        date(),
        "Alice",
        &["Bob".to_string(), "Carol".to_string()],
    )
    .unwrap();

    let bob = group.member_by_name("Bob").unwrap().id;
    let err = MemberService::remove(&mut group, bob).unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    // An unreferenced member can still be removed.
    MemberService::add(&mut group, "Dave").unwrap();
    let dave = group.member_by_name("Dave").unwrap().id;
    MemberService::remove(&mut group, dave).unwrap();
    assert!(group.member_by_name("Dave").is_none());
}

#[test]
fn expense_with_unknown_payer_is_rejected() {
    let mut group = prepared_group();
    let err = ExpenseService::add(&mut group, "Dinner", 30.0, date(), "Mallory", &[]).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn payer_cannot_appear_in_split_list() {
    let mut group = prepared_group();
    let err = ExpenseService::add(
        &mut group,
        "Dinner",
        30.0,
        date(),
        "Alice",
        &["Alice".to_string()],
    )
    .unwrap_err();
    assert!(matches!(err, ServiceError::Invalid(_)));
}

#[test]
fn empty_split_list_means_payer_only() {
    let mut group = prepared_group();
    let id = ExpenseService::add(&mut group, "Taxi", 20.0, date(), "Bob", &[]).unwrap();
    let expense = group.expense(id).unwrap();
    let bob = group.member_by_name("Bob").unwrap().id;
    assert_eq!(expense.splits.len(), 1);
    assert_eq!(expense.splits[0].member_id, bob);
    assert_eq!(expense.splits[0].share_amount, 20.0);
}

#[test]
fn equal_shares_round_to_cents() {
    let mut group = prepared_group();
    let id = ExpenseService::add(
        &mut group,
        "Groceries",
        10.0,
        date(),
        "Alice",
        &["Bob".to_string(), "Carol".to_string()],
    )
    .unwrap();
    let expense = group.expense(id).unwrap();
    for split in &expense.splits {
        assert_eq!(split.share_amount, 5.0);
    }

    let odd = ExpenseService::add(
        &mut group,
        "Snacks",
        10.0,
        date(),
        "Alice",
        &["Bob".to_string(), "Carol".to_string(), "Alice".to_string()],
    );
    // Payer in split list is invalid, so build a three-way split differently.
    assert!(odd.is_err());
}

#[test]
fn explicit_splits_must_sum_to_the_amount() {
    let mut group = prepared_group();
    let id = ExpenseService::add(&mut group, "Dinner", 50.0, date(), "Alice", &[]).unwrap();
    let bob = group.member_by_name("Bob").unwrap().id;
    let carol = group.member_by_name("Carol").unwrap().id;

    let err = ExpenseService::set_splits(&mut group, id, &[(bob, 20.0), (carol, 20.0)]).unwrap_err();
    assert!(matches!(err, ServiceError::Integrity(_)));

    ExpenseService::set_splits(&mut group, id, &[(bob, 20.0), (carol, 30.0)]).unwrap();
    let expense = group.expense(id).unwrap();
    assert_eq!(expense.split_total(), 50.0);
    assert!(!expense.splits_mismatch());
}

#[test]
fn editing_amount_can_strand_old_splits() {
    let mut group = prepared_group();
    let id = ExpenseService::add(
        &mut group,
        "Dinner",
        40.0,
        date(),
        "Alice",
        &["Bob".to_string()],
    )
    .unwrap();

    let changes = ExpenseChanges {
        amount: Some(55.0),
        ..Default::default()
    };
    ExpenseService::edit(&mut group, id, changes).unwrap();
    assert!(group.expense(id).unwrap().splits_mismatch());
}

#[test]
fn payments_require_distinct_known_members() {
    let mut group = prepared_group();
    assert!(matches!(
        PaymentService::record(&mut group, "Alice", "Alice", 5.0, date()).unwrap_err(),
        ServiceError::Invalid(_)
    ));
    assert!(matches!(
        PaymentService::record(&mut group, "Alice", "Mallory", 5.0, date()).unwrap_err(),
        ServiceError::NotFound(_)
    ));
    assert!(matches!(
        PaymentService::record(&mut group, "Alice", "Bob", -5.0, date()).unwrap_err(),
        ServiceError::Invalid(_)
    ));
    PaymentService::record(&mut group, "Alice", "Bob", 5.0, date()).unwrap();
    assert_eq!(group.payments.len(), 1);
}

#[test]
fn full_flow_settles_to_zero() {
    let mut group = prepared_group();
    ExpenseService::add(
        &mut group,
        "Cabin",
        300.0,
        date(),
        "Alice",
        &["Bob".to_string(), "Carol".to_string()],
    )
    .unwrap();
    ExpenseService::add(
        &mut group,
        "Fuel",
        60.0,
        date(),
        "Bob",
        &["Alice".to_string(), "Carol".to_string()],
    )
    .unwrap();

    let rows = settlement::balances_for(&group);
    let net_total: f64 = rows.iter().map(|r| r.net).sum();
    assert_eq!(round_cents(net_total), 0.0);

    let transfers = settlement::solve(&settlement::balance_map(&rows));
    assert!(!transfers.is_empty());

    // Applying the plan as payments settles everyone.
    for transfer in &transfers {
        PaymentService::record(&mut group, &transfer.from, &transfer.to, transfer.amount, date())
            .unwrap();
    }
    let rows = settlement::balances_for(&group);
    let transfers = settlement::solve(&settlement::balance_map(&rows));
    assert!(transfers.is_empty());
}
