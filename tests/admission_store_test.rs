//! Admission store integration tests
//!
//! Runs the guarded create paths against a real Postgres instance: the
//! row-lock capacity gate and the conditional inserts against the partial
//! unique indexes, plus the aggregator's handling of records whose source
//! event is gone. The decision-layer scenarios live in
//! admission_policy_test.rs; these tests verify the same rules hold where
//! they are enforced, in the store.

mod helpers;

use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime};
use serial_test::serial;

use clubmate::database::{
    ClubJoinRepository, ClubRepository, EventRepository, RegistrationRepository,
};
use clubmate::models::{
    CreateClubJoinRequest, CreateClubRequest, CreateEventRequest, CreateRegistrationRequest,
    JoinStatus,
};
use clubmate::services::AggregatorService;
use clubmate::ClubMateError;
use helpers::TestDatabase;

fn event_request(title: &str, capacity: i32) -> CreateEventRequest {
    CreateEventRequest {
        title: title.to_string(),
        event_date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
        event_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        location: "Main Auditorium".to_string(),
        club: "CSI Chapter".to_string(),
        description: "Build and pitch an ML project".to_string(),
        category: None,
        capacity,
    }
}

fn club_request(name: &str) -> CreateClubRequest {
    CreateClubRequest {
        name: name.to_string(),
        description: "Cloud computing community".to_string(),
        logo: None,
        category: None,
        member_count: None,
        established_year: Some(2021),
        contact_email: "club@campus.edu".to_string(),
    }
}

fn registration_request(event_id: i64, user_id: &str) -> CreateRegistrationRequest {
    CreateRegistrationRequest {
        event_id,
        user_id: user_id.to_string(),
        user_name: "Student".to_string(),
        user_email: format!("{user_id}@campus.edu"),
        user_phone: "9876543210".to_string(),
        user_branch: None,
        user_year: 3,
    }
}

fn join_request(club_id: i64, user_id: &str) -> CreateClubJoinRequest {
    CreateClubJoinRequest {
        club_id,
        club_name: "AWS Cloud Club".to_string(),
        user_id: user_id.to_string(),
        user_name: "Student".to_string(),
        user_email: format!("{user_id}@campus.edu"),
        user_phone: "9876543210".to_string(),
        user_branch: None,
        user_year: 3,
    }
}

#[tokio::test]
#[serial]
async fn duplicate_registration_insert_creates_no_second_record() {
    let db = TestDatabase::new().await.expect("test database");
    db.cleanup().await.expect("cleanup");

    let events = EventRepository::new(db.pool.clone());
    let registrations = RegistrationRepository::new(db.pool.clone());

    let event = events.create(event_request("Hack Day", 50)).await.unwrap();

    let first = registrations
        .create_admission(registration_request(event.id, "user-a"))
        .await
        .unwrap();
    assert_eq!(first.status, "confirmed");

    let second = registrations
        .create_admission(registration_request(event.id, "user-a"))
        .await;
    assert_matches!(second, Err(ClubMateError::AlreadyRegistered { .. }));

    assert_eq!(registrations.count_admitted(event.id).await.unwrap(), 1);
}

#[tokio::test]
#[serial]
async fn insert_past_capacity_creates_no_record() {
    let db = TestDatabase::new().await.expect("test database");
    db.cleanup().await.expect("cleanup");

    let events = EventRepository::new(db.pool.clone());
    let registrations = RegistrationRepository::new(db.pool.clone());

    let event = events.create(event_request("Workshop", 2)).await.unwrap();

    for user in ["user-a", "user-b"] {
        registrations
            .create_admission(registration_request(event.id, user))
            .await
            .unwrap();
    }

    let overflow = registrations
        .create_admission(registration_request(event.id, "user-c"))
        .await;
    assert_matches!(overflow, Err(ClubMateError::CapacityExceeded { capacity: 2, .. }));

    assert_eq!(registrations.count_admitted(event.id).await.unwrap(), 2);
    assert!(registrations
        .find_active(event.id, "user-c")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[serial]
async fn cancelled_registration_does_not_block_reinsert() {
    let db = TestDatabase::new().await.expect("test database");
    db.cleanup().await.expect("cleanup");

    let events = EventRepository::new(db.pool.clone());
    let registrations = RegistrationRepository::new(db.pool.clone());

    let event = events.create(event_request("Seminar", 10)).await.unwrap();

    let first = registrations
        .create_admission(registration_request(event.id, "user-a"))
        .await
        .unwrap();

    sqlx::query("UPDATE registrations SET status = 'cancelled' WHERE id = $1")
        .bind(first.id)
        .execute(&db.pool)
        .await
        .unwrap();

    let second = registrations
        .create_admission(registration_request(event.id, "user-a"))
        .await
        .unwrap();
    assert_ne!(second.id, first.id);
    assert_eq!(registrations.count_admitted(event.id).await.unwrap(), 1);
}

#[tokio::test]
#[serial]
async fn registration_for_missing_event_reports_not_found() {
    let db = TestDatabase::new().await.expect("test database");
    db.cleanup().await.expect("cleanup");

    let registrations = RegistrationRepository::new(db.pool.clone());

    let result = registrations
        .create_admission(registration_request(424242, "user-a"))
        .await;
    assert_matches!(
        result,
        Err(ClubMateError::EventNotFound { event_id: 424242 })
    );
}

#[tokio::test]
#[serial]
async fn club_join_insert_blocks_duplicates_until_rejected() {
    let db = TestDatabase::new().await.expect("test database");
    db.cleanup().await.expect("cleanup");

    let clubs = ClubRepository::new(db.pool.clone());
    let club_joins = ClubJoinRepository::new(db.pool.clone());

    let club = clubs.create(club_request("AWS Cloud Club")).await.unwrap();

    let first = club_joins
        .create_admission(join_request(club.id, "user-a"))
        .await
        .unwrap();
    assert_eq!(first.status, "pending");

    let duplicate = club_joins
        .create_admission(join_request(club.id, "user-a"))
        .await;
    assert_matches!(duplicate, Err(ClubMateError::AlreadyJoined { .. }));

    // Approval keeps blocking.
    club_joins
        .update_status(first.id, JoinStatus::Approved.as_str())
        .await
        .unwrap();
    let still_blocked = club_joins
        .create_admission(join_request(club.id, "user-a"))
        .await;
    assert_matches!(still_blocked, Err(ClubMateError::AlreadyJoined { .. }));

    // A rejected join no longer matches the partial index; resubmission works.
    club_joins
        .update_status(first.id, JoinStatus::Rejected.as_str())
        .await
        .unwrap();
    let resubmitted = club_joins
        .create_admission(join_request(club.id, "user-a"))
        .await
        .unwrap();
    assert_ne!(resubmitted.id, first.id);
}

#[tokio::test]
#[serial]
async fn aggregator_omits_registrations_for_removed_events() {
    let db = TestDatabase::new().await.expect("test database");
    db.cleanup().await.expect("cleanup");

    let events = EventRepository::new(db.pool.clone());
    let registrations = RegistrationRepository::new(db.pool.clone());
    let club_joins = ClubJoinRepository::new(db.pool.clone());

    let kept = events.create(event_request("Hack Day", 50)).await.unwrap();
    let removed = events.create(event_request("Cancelled Expo", 50)).await.unwrap();

    registrations
        .create_admission(registration_request(kept.id, "user-a"))
        .await
        .unwrap();
    registrations
        .create_admission(registration_request(removed.id, "user-a"))
        .await
        .unwrap();

    sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(removed.id)
        .execute(&db.pool)
        .await
        .unwrap();

    let aggregator = AggregatorService::new(events, registrations, club_joins);
    let views = aggregator.list_my_registrations("user-a").await.unwrap();

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].event.id, kept.id);
    assert_eq!(views[0].occupancy.admitted_count, 1);
}
