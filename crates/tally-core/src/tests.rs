use chrono::NaiveDate;

use tally_domain::{
    BudgetSet, ExpenseCategory, ExpenseEntry, ExpenseLedger, HistoryArchive, PeriodMarker,
    Session, DEFAULT_BUDGET_ID,
};

use crate::{
    budget_service::BudgetService, expense_service::ExpenseService, rollover::RolloverEngine,
    rollover::RolloverState, summary_service::NetStanding, summary_service::SummaryService,
    time::Clock, time::FixedClock, time::SystemClock, CoreError,
};

fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn set_with_expenses() -> BudgetSet {
    let mut set = BudgetSet::new();
    let ledger = &mut set.active_mut().ledger;
    ExpenseService::upsert(
        ledger,
        ExpenseCategory::Recurring,
        "rent",
        1000.0,
        "apartment",
        sample_date(2024, 1, 1),
        sample_date(2024, 1, 1),
    )
    .expect("add rent");
    ExpenseService::upsert(
        ledger,
        ExpenseCategory::OneTime,
        "gift",
        50.0,
        "",
        sample_date(2024, 1, 12),
        sample_date(2024, 1, 12),
    )
    .expect("add gift");
    set
}

#[test]
fn upsert_then_total_reflects_exact_amount() {
    let mut set = BudgetSet::new();
    let ledger = &mut set.active_mut().ledger;
    let clock = FixedClock(sample_date(2024, 1, 15));

    ExpenseService::record(ledger, &clock, ExpenseCategory::Recurring, "gym", 19.99, "")
        .expect("record gym");
    assert_eq!(
        ExpenseService::total_of(ledger, ExpenseCategory::Recurring),
        19.99
    );

    let entry = ledger.recurring.get("gym").expect("entry exists");
    assert_eq!(entry.expense_date, clock.0);
    assert_eq!(entry.input_date, clock.0);
}

#[test]
fn upsert_overwrites_in_place() {
    let mut set = set_with_expenses();
    let ledger = &mut set.active_mut().ledger;

    ExpenseService::upsert(
        ledger,
        ExpenseCategory::Recurring,
        "rent",
        1100.0,
        "raised",
        sample_date(2024, 2, 1),
        sample_date(2024, 1, 28),
    )
    .expect("overwrite rent");

    let entry = ledger.recurring.get("rent").unwrap();
    assert_eq!(entry.amount, 1100.0);
    assert_eq!(entry.comment, "raised");
    assert_eq!(ledger.recurring.len(), 1);
}

#[test]
fn upsert_rejects_malformed_amounts() {
    let mut set = BudgetSet::new();
    let ledger = &mut set.active_mut().ledger;
    for bad in [-5.0, f64::NAN, f64::INFINITY, 3.141] {
        let result = ExpenseService::upsert(
            ledger,
            ExpenseCategory::OneTime,
            "bad",
            bad,
            "",
            sample_date(2024, 1, 1),
            sample_date(2024, 1, 1),
        );
        assert!(matches!(result, Err(CoreError::InvalidAmount(_))));
    }
    assert!(ledger.one_time.is_empty());
}

#[test]
fn upsert_rejects_name_held_by_other_category() {
    let mut set = set_with_expenses();
    let ledger = &mut set.active_mut().ledger;
    let result = ExpenseService::upsert(
        ledger,
        ExpenseCategory::OneTime,
        "rent",
        10.0,
        "",
        sample_date(2024, 1, 5),
        sample_date(2024, 1, 5),
    );
    assert!(matches!(result, Err(CoreError::DuplicateName { .. })));
}

#[test]
fn remove_is_idempotent() {
    let mut set = set_with_expenses();
    let ledger = &mut set.active_mut().ledger;

    let first = ExpenseService::remove(ledger, ExpenseCategory::OneTime, "gift");
    assert_eq!(first.unwrap().amount, 50.0);
    let snapshot = ledger.clone();

    let second = ExpenseService::remove(ledger, ExpenseCategory::OneTime, "gift");
    assert!(second.is_none());
    assert_eq!(*ledger, snapshot);
}

#[test]
fn reorder_preserves_totals() {
    let mut set = BudgetSet::new();
    let ledger = &mut set.active_mut().ledger;
    let clock = FixedClock(sample_date(2024, 3, 3));
    for (name, amount) in [("a", 1.25), ("b", 2.5), ("c", 3.75)] {
        ExpenseService::record(ledger, &clock, ExpenseCategory::Recurring, name, amount, "")
            .expect("record");
    }
    let before = ExpenseService::total_of(ledger, ExpenseCategory::Recurring);

    ExpenseService::reorder(
        ledger,
        ExpenseCategory::Recurring,
        &["c".into(), "a".into(), "b".into()],
    )
    .expect("reorder");

    assert_eq!(
        ExpenseService::total_of(ledger, ExpenseCategory::Recurring),
        before
    );
    assert_eq!(
        ledger.recurring.names().collect::<Vec<_>>(),
        vec!["c", "a", "b"]
    );
}

#[test]
fn reorder_rejects_mismatched_key_sets() {
    let mut set = set_with_expenses();
    let ledger = &mut set.active_mut().ledger;
    let result = ExpenseService::reorder(
        ledger,
        ExpenseCategory::Recurring,
        &["rent".into(), "ghost".into()],
    );
    assert!(matches!(
        result,
        Err(CoreError::InvalidPermutation {
            category: ExpenseCategory::Recurring
        })
    ));
    assert_eq!(ledger.recurring.names().collect::<Vec<_>>(), vec!["rent"]);
}

#[test]
fn move_category_is_a_single_step_switch() {
    let mut set = set_with_expenses();
    let ledger = &mut set.active_mut().ledger;

    ExpenseService::move_category(
        ledger,
        "gift",
        ExpenseCategory::OneTime,
        ExpenseCategory::Recurring,
    )
    .expect("move gift");
    assert_eq!(ledger.category_of("gift"), Some(ExpenseCategory::Recurring));
    assert!(ledger.one_time.is_empty());

    let missing = ExpenseService::move_category(
        ledger,
        "ghost",
        ExpenseCategory::OneTime,
        ExpenseCategory::Recurring,
    );
    assert!(matches!(missing, Err(CoreError::ExpenseNotFound { .. })));
}

#[test]
fn move_category_refuses_to_clobber_the_target() {
    // A decoded ledger may carry the same name in both books; a move must
    // not silently overwrite the target entry.
    let date = sample_date(2024, 1, 5);
    let mut ledger = ExpenseLedger::new();
    ledger
        .recurring
        .insert("internet", ExpenseEntry::new(60.0, "", date, date));
    ledger
        .one_time
        .insert("internet", ExpenseEntry::new(45.0, "setup fee", date, date));

    let clash = ExpenseService::move_category(
        &mut ledger,
        "internet",
        ExpenseCategory::OneTime,
        ExpenseCategory::Recurring,
    );
    assert!(matches!(clash, Err(CoreError::DuplicateName { .. })));
    assert_eq!(ledger.recurring.get("internet").unwrap().amount, 60.0);
    assert_eq!(ledger.one_time.get("internet").unwrap().amount, 45.0);
}

#[test]
fn default_budget_is_protected() {
    let mut set = BudgetSet::new();
    assert!(matches!(
        BudgetService::remove_budget(&mut set, DEFAULT_BUDGET_ID),
        Err(CoreError::CannotRemoveDefaultBudget)
    ));

    // Still protected with more budgets around, active or not.
    BudgetService::add_budget(&mut set, "Travel");
    assert!(matches!(
        BudgetService::remove_budget(&mut set, DEFAULT_BUDGET_ID),
        Err(CoreError::CannotRemoveDefaultBudget)
    ));
}

#[test]
fn budget_cursor_follows_service_operations() {
    let mut set = BudgetSet::new();
    let travel = BudgetService::add_budget(&mut set, "Travel");
    assert_eq!(set.active_id(), travel);

    BudgetService::set_active(&mut set, DEFAULT_BUDGET_ID).expect("activate default");
    assert_eq!(set.active_id(), DEFAULT_BUDGET_ID);
    assert!(matches!(
        BudgetService::set_active(&mut set, 999),
        Err(CoreError::BudgetNotFound(999))
    ));

    BudgetService::rename_budget(&mut set, travel, "Vacation").expect("rename");
    assert_eq!(set.get(travel).unwrap().title, "Vacation");

    BudgetService::remove_budget(&mut set, travel).expect("remove travel");
    assert!(matches!(
        BudgetService::remove_budget(&mut set, travel),
        Err(CoreError::BudgetNotFound(_))
    ));
}

#[test]
fn set_income_validates_like_expenses() {
    let mut set = BudgetSet::new();
    BudgetService::set_income(&mut set, DEFAULT_BUDGET_ID, 2500.0).expect("set income");
    assert_eq!(set.active().income, 2500.0);

    assert!(matches!(
        BudgetService::set_income(&mut set, DEFAULT_BUDGET_ID, -1.0),
        Err(CoreError::InvalidAmount(_))
    ));
    assert!(matches!(
        BudgetService::set_income(&mut set, 42, 100.0),
        Err(CoreError::BudgetNotFound(42))
    ));
}

#[test]
fn summary_matches_income_minus_expenses() {
    let mut set = set_with_expenses();
    BudgetService::set_income(&mut set, DEFAULT_BUDGET_ID, 2500.0).expect("set income");

    let summary = SummaryService::summarize(set.active());
    assert_eq!(summary.monthly_total, 1000.0);
    assert_eq!(summary.one_time_total, 50.0);
    assert_eq!(summary.total_expenses, 1050.0);
    assert_eq!(summary.net_leftover, 1450.0);
    assert_eq!(summary.standing, NetStanding::Surplus);
}

#[test]
fn summary_handles_zero_and_negative_nets() {
    let empty = BudgetSet::new();
    let summary = SummaryService::summarize(empty.active());
    assert_eq!(summary.total_expenses, 0.0);
    assert_eq!(summary.net_leftover, 0.0);
    assert_eq!(summary.standing, NetStanding::Balanced);

    // Unset income defaults to zero, so expenses push the net negative.
    let overdrawn = set_with_expenses();
    let summary = SummaryService::summarize(overdrawn.active());
    assert_eq!(summary.net_leftover, -1050.0);
    assert_eq!(summary.standing, NetStanding::Deficit);
}

#[test]
fn system_clock_reports_a_valid_period() {
    let clock = SystemClock;
    let marker = PeriodMarker::from_date(clock.today());
    assert!((1..=12).contains(&marker.month));
    assert_eq!(marker, PeriodMarker::from_date(clock.now().date_naive()));
}

#[test]
fn rollover_archives_departing_period() {
    let mut set = set_with_expenses();
    let mut session = Session::new("user@example.com", PeriodMarker::new(2024, 1));
    let mut archive = HistoryArchive::new();
    let mut engine = RolloverEngine::new();

    let report = engine
        .run(
            &mut session,
            &mut set,
            &mut archive,
            sample_date(2024, 2, 3),
        )
        .expect("rollover fires");

    assert_eq!(report.departed, PeriodMarker::new(2024, 1));
    assert_eq!(report.current, PeriodMarker::new(2024, 2));
    assert_eq!(report.entries_archived, 2);

    let snapshot = archive.snapshot(2024, 1).expect("cell created");
    assert_eq!(snapshot.recurring.get("rent").unwrap().amount, 1000.0);
    assert_eq!(snapshot.one_time.get("gift").unwrap().amount, 50.0);

    let ledger = &set.active().ledger;
    assert!(ledger.one_time.is_empty());
    assert!(ledger.recurring.contains("rent"));
    assert_eq!(session.marker, PeriodMarker::new(2024, 2));
    assert_eq!(engine.state(), RolloverState::Current);
}

#[test]
fn rollover_is_a_no_op_within_the_period() {
    let mut set = set_with_expenses();
    let mut session = Session::new("user@example.com", PeriodMarker::new(2024, 1));
    let mut archive = HistoryArchive::new();
    let mut engine = RolloverEngine::new();

    let report = engine.run(
        &mut session,
        &mut set,
        &mut archive,
        sample_date(2024, 1, 31),
    );

    assert!(report.is_none());
    assert!(archive.is_empty());
    assert_eq!(session.marker, PeriodMarker::new(2024, 1));
    assert!(set.active().ledger.one_time.contains("gift"));
}

#[test]
fn rollover_covers_every_budget_in_the_set() {
    let mut set = set_with_expenses();
    let travel = BudgetService::add_budget(&mut set, "Travel");
    let clock = FixedClock(sample_date(2024, 1, 20));
    ExpenseService::record(
        &mut set.get_mut(travel).unwrap().ledger,
        &clock,
        ExpenseCategory::OneTime,
        "flights",
        300.0,
        "",
    )
    .expect("record flights");

    let mut session = Session::new("user@example.com", PeriodMarker::new(2024, 1));
    let mut archive = HistoryArchive::new();
    let mut engine = RolloverEngine::new();
    let report = engine
        .run(
            &mut session,
            &mut set,
            &mut archive,
            sample_date(2024, 2, 1),
        )
        .expect("rollover fires");

    assert_eq!(report.budgets_migrated, 2);
    let snapshot = archive.snapshot(2024, 1).unwrap();
    assert_eq!(snapshot.one_time.get("flights").unwrap().amount, 300.0);
    assert!(set.get(travel).unwrap().ledger.one_time.is_empty());
}

#[test]
fn rollover_crosses_year_boundaries() {
    let mut set = set_with_expenses();
    let mut session = Session::new("user@example.com", PeriodMarker::new(2023, 12));
    let mut archive = HistoryArchive::new();
    let mut engine = RolloverEngine::new();

    engine
        .run(
            &mut session,
            &mut set,
            &mut archive,
            sample_date(2024, 1, 2),
        )
        .expect("rollover fires");

    assert!(archive.snapshot(2023, 12).is_some());
    assert_eq!(session.marker, PeriodMarker::new(2024, 1));
}

#[test]
fn skipped_months_collapse_into_one_departing_cell() {
    // Inactive from January through April: the data is archived once under
    // January, and the marker jumps straight to April.
    let mut set = set_with_expenses();
    let mut session = Session::new("user@example.com", PeriodMarker::new(2024, 1));
    let mut archive = HistoryArchive::new();
    let mut engine = RolloverEngine::new();

    engine
        .run(
            &mut session,
            &mut set,
            &mut archive,
            sample_date(2024, 4, 10),
        )
        .expect("rollover fires");

    assert!(archive.snapshot(2024, 1).is_some());
    assert!(archive.snapshot(2024, 2).is_none());
    assert!(archive.snapshot(2024, 3).is_none());
    assert_eq!(session.marker, PeriodMarker::new(2024, 4));
}
