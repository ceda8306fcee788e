use crate::intent_store::PendingIntentStore;
use crate::memory_intent_store::MemoryIntentStore;
use crate::reconciler::ProfileReconciler;
use crate::registrar::{IdentityRegistrar, RegistrationError};
use crate::tests::fakes::{FailingIntentStore, FakeIdentityProvider, FakeProfileStore};
use crate::tests::{TEST_EMAIL, fast_policy, profile};

use std::sync::Arc;

use cm_core::{Identity, IdentityError, Role};
use googletest::assert_that;
use googletest::prelude::{anything, eq, err, none, ok, some};
use uuid::Uuid;

const MIN_PASSWORD_LENGTH: usize = 8;

fn registrar(
    provider: Arc<FakeIdentityProvider>,
    store: Arc<FakeProfileStore>,
    intents: Arc<MemoryIntentStore>,
) -> IdentityRegistrar {
    let reconciler = Arc::new(ProfileReconciler::new(
        store,
        intents.clone(),
        fast_policy(),
    ));

    IdentityRegistrar::new(provider, intents, reconciler, MIN_PASSWORD_LENGTH)
}

#[tokio::test]
async fn given_email_without_at_when_register_then_invalid_email() {
    // Given
    let provider = Arc::new(FakeIdentityProvider::succeeding());
    let registrar = registrar(
        provider.clone(),
        Arc::new(FakeProfileStore::absent()),
        Arc::new(MemoryIntentStore::new()),
    );

    // When
    let result = registrar.register("not-an-email", "password123", Role::Vendor).await;

    // Then
    assert!(matches!(
        result,
        Err(RegistrationError::InvalidEmail { .. })
    ));
    assert_that!(provider.created().len(), eq(0));
}

#[tokio::test]
async fn given_email_without_domain_dot_when_register_then_invalid_email() {
    // Given
    let provider = Arc::new(FakeIdentityProvider::succeeding());
    let registrar = registrar(
        provider.clone(),
        Arc::new(FakeProfileStore::absent()),
        Arc::new(MemoryIntentStore::new()),
    );

    // When
    let result = registrar.register("amy@campus", "password123", Role::Vendor).await;

    // Then
    assert!(matches!(
        result,
        Err(RegistrationError::InvalidEmail { .. })
    ));
}

#[tokio::test]
async fn given_email_with_whitespace_when_register_then_invalid_email() {
    // Given
    let provider = Arc::new(FakeIdentityProvider::succeeding());
    let registrar = registrar(
        provider.clone(),
        Arc::new(FakeProfileStore::absent()),
        Arc::new(MemoryIntentStore::new()),
    );

    // When
    let result = registrar
        .register("amy smith@campus.edu", "password123", Role::Vendor)
        .await;

    // Then
    assert!(matches!(
        result,
        Err(RegistrationError::InvalidEmail { .. })
    ));
}

#[tokio::test]
async fn given_short_password_when_register_then_password_too_short() {
    // Given
    let provider = Arc::new(FakeIdentityProvider::succeeding());
    let registrar = registrar(
        provider.clone(),
        Arc::new(FakeProfileStore::absent()),
        Arc::new(MemoryIntentStore::new()),
    );

    // When
    let result = registrar.register(TEST_EMAIL, "short", Role::Vendor).await;

    // Then
    match result {
        Err(RegistrationError::PasswordTooShort { minimum, .. }) => {
            assert_that!(minimum, eq(MIN_PASSWORD_LENGTH));
        }
        other => panic!("expected PasswordTooShort, got {other:?}"),
    }
    assert_that!(provider.created().len(), eq(0));
}

#[tokio::test]
async fn given_email_already_registered_when_register_then_identity_error() {
    // Given
    let provider = Arc::new(FakeIdentityProvider::rejecting_email());
    let intents = Arc::new(MemoryIntentStore::new());
    let registrar = registrar(
        provider.clone(),
        Arc::new(FakeProfileStore::absent()),
        intents.clone(),
    );

    // When
    let result = registrar
        .register(TEST_EMAIL, "password123", Role::Vendor)
        .await;

    // Then
    assert!(matches!(
        result,
        Err(RegistrationError::Identity {
            source: IdentityError::EmailTaken { .. },
            ..
        })
    ));
}

#[tokio::test]
async fn given_auth_service_down_when_register_then_identity_error() {
    // Given
    let provider = Arc::new(FakeIdentityProvider::unavailable());
    let registrar = registrar(
        provider.clone(),
        Arc::new(FakeProfileStore::absent()),
        Arc::new(MemoryIntentStore::new()),
    );

    // When
    let result = registrar
        .register(TEST_EMAIL, "password123", Role::Vendor)
        .await;

    // Then
    assert_that!(result, err(anything()));
}

#[tokio::test]
async fn given_valid_signup_when_register_then_identity_returned_and_intent_recorded() {
    // Given
    let provider = Arc::new(FakeIdentityProvider::succeeding());
    let intents = Arc::new(MemoryIntentStore::new());
    let registrar = registrar(
        provider.clone(),
        Arc::new(FakeProfileStore::absent()),
        intents.clone(),
    );

    // When
    let identity = registrar
        .register(TEST_EMAIL, "password123", Role::Vendor)
        .await
        .unwrap();

    // Then
    assert_that!(identity.email.as_str(), eq(TEST_EMAIL));
    assert_that!(
        provider.created(),
        eq(&vec![(TEST_EMAIL.to_string(), Role::Vendor)])
    );
    let intent = intents.get(identity.id).unwrap().unwrap();
    assert_that!(intent.declared_role, eq(Role::Vendor));
    assert_that!(intent.email.as_str(), eq(TEST_EMAIL));
}

#[tokio::test]
async fn given_intent_store_failure_when_register_then_signup_still_succeeds() {
    // Given
    let provider = Arc::new(FakeIdentityProvider::succeeding());
    let store = Arc::new(FakeProfileStore::absent());
    let reconciler = Arc::new(ProfileReconciler::new(
        store,
        Arc::new(FailingIntentStore),
        fast_policy(),
    ));
    let registrar = IdentityRegistrar::new(
        provider.clone(),
        Arc::new(FailingIntentStore),
        reconciler,
        MIN_PASSWORD_LENGTH,
    );

    // When
    let result = registrar
        .register(TEST_EMAIL, "password123", Role::Vendor)
        .await;

    // Then
    assert_that!(result, ok(anything()));
}

#[tokio::test]
async fn given_materialized_profile_when_register_then_background_pass_converges() {
    // Given
    let id = Uuid::new_v4();
    let identity = Identity {
        id,
        email: TEST_EMAIL.to_string(),
        created_at: chrono::Utc::now(),
    };
    let provider = Arc::new(FakeIdentityProvider::creating(identity));
    let store = Arc::new(FakeProfileStore::materialized(profile(id, Role::Student)));
    let intents = Arc::new(MemoryIntentStore::new());
    let registrar = registrar(provider.clone(), store.clone(), intents.clone());

    // When
    let returned = registrar
        .register(TEST_EMAIL, "password123", Role::Vendor)
        .await
        .unwrap();
    tokio::task::yield_now().await;

    // Then
    assert_that!(returned.id, eq(id));
    assert_that!(store.stored_role(), some(eq(Role::Vendor)));
    assert_that!(intents.get(id).unwrap(), none());
}
