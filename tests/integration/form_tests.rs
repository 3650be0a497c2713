//! Form controllers wired through `Services` against the fake library

use std::sync::Arc;
use std::time::Duration;

use library_forms::{
    models::{FieldKey, FieldStatus, FormKind, Verification},
    view::{FieldIndicator, MemoryView},
    AppError, Services,
};

use crate::support::{catalog, spawn_fake_library};

#[tokio::test]
async fn test_book_duplicate_blocks_save_until_cleared() {
    let server = spawn_fake_library(catalog()).await;
    let services = Services::new(&server.config()).unwrap();
    let view = Arc::new(MemoryView::new(services.alerts.clone()));
    let form = services.form(FormKind::Book, None, Arc::clone(&view));

    form.validate_now(FieldKey::Isbn, " 9780441013593 ").await.unwrap();
    assert_eq!(view.field(FieldKey::Isbn).indicator, FieldIndicator::Duplicate);
    assert!(!view.save_button().enabled);
    assert!(matches!(
        form.guard_submission(),
        Err(AppError::SubmissionBlocked(_))
    ));
    assert_eq!(view.alerts().len(), 1);

    form.input(FieldKey::Isbn, "").unwrap();
    assert!(view.save_button().enabled);
    assert!(form.guard_submission().is_ok());
    assert_eq!(server.seen()[0]["value"], "9780441013593");
}

#[tokio::test]
async fn test_editing_member_does_not_flag_itself() {
    let server = spawn_fake_library(catalog()).await;
    let services = Services::new(&server.config()).unwrap();
    let view = Arc::new(MemoryView::default());
    let form = services.form(FormKind::Member, Some("42".to_string()), Arc::clone(&view));

    let values = vec![
        (FieldKey::Name, "Sokha Chan".to_string()),
        (FieldKey::Email, "sokha@example.org".to_string()),
        (FieldKey::Phone, "012345678".to_string()),
    ];
    form.initialize(&values).await.unwrap();

    assert!(form.compute_save_gate());
    assert_eq!(server.seen().len(), 3);
    for (field, entry) in form.snapshot().iter() {
        assert_eq!(entry.status, FieldStatus::Valid(Verification::Confirmed));
        assert_eq!(view.field(field).indicator, FieldIndicator::Available);
    }
}

#[tokio::test]
async fn test_broken_endpoint_fails_open() {
    let server = spawn_fake_library(catalog()).await;
    let services = Services::new(&server.config()).unwrap();
    let view = Arc::new(MemoryView::default());
    let form = services.form(FormKind::Book, None, Arc::clone(&view));

    form.record_validation(FieldKey::Title, false).unwrap();
    form.validate_now(FieldKey::Title, "boom").await.unwrap();

    assert_eq!(
        form.snapshot().get(FieldKey::Title).unwrap().status,
        FieldStatus::Valid(Verification::FailedOpen)
    );
    assert!(!view.field(FieldKey::Title).busy);
    assert!(view.save_button().enabled);
}

#[tokio::test]
async fn test_typing_checks_only_the_settled_value() {
    let server = spawn_fake_library(catalog()).await;
    let mut config = server.config();
    config.forms.debounce_ms = 50;
    let services = Services::new(&config).unwrap();
    let view = Arc::new(MemoryView::default());
    let form = services.form(FormKind::Book, None, Arc::clone(&view));

    for partial in ["D", "Du", "Dun", "Dune"] {
        form.input(FieldKey::Title, partial).unwrap();
    }

    let mut waited = Duration::ZERO;
    while form.compute_save_gate() && waited < Duration::from_secs(5) {
        tokio::time::sleep(Duration::from_millis(20)).await;
        waited += Duration::from_millis(20);
    }

    assert!(!form.compute_save_gate());
    let seen = server.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["value"], "Dune");
}
