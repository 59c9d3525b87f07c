//! End-to-end walk through the account lifecycle: register, sign out,
//! sign back in, edit the profile, and reload from storage.

#![allow(clippy::unwrap_used)]

use account_manager_core::{AccountStore, Error, StateRepository};

#[tokio::test]
async fn full_account_lifecycle() {
    let repo = StateRepository::in_memory().await.unwrap();
    let mut store = AccountStore::open(repo.clone()).await.unwrap();

    // Fresh store starts anonymous and empty.
    assert!(store.accounts().is_empty());
    assert!(!store.is_authenticated());

    // Registration signs the new account in.
    store
        .register("Alex Johnson", "alex.johnson@gmail.com", "123456")
        .await
        .unwrap();
    assert_eq!(store.current_user().unwrap().name, "Alex Johnson");

    // Sign out, then back in with a differently-cased email.
    store.logout().await.unwrap();
    assert!(!store.is_authenticated());

    store
        .login("ALEX.JOHNSON@GMAIL.COM", "123456")
        .await
        .unwrap();
    assert_eq!(
        store.current_user().unwrap().email,
        "alex.johnson@gmail.com"
    );

    // A wrong password is rejected and the session is untouched.
    let err = store.login("alex.johnson@gmail.com", "000000").await;
    assert!(matches!(err, Err(Error::InvalidCredentials)));
    assert!(store.is_authenticated());

    // Editing the profile without a password keeps the old one.
    store
        .update_profile("Alex J.", "alex.johnson@gmail.com", None)
        .await
        .unwrap();
    let user = store.current_user().unwrap();
    assert_eq!(user.name, "Alex J.");
    assert_eq!(user.password, "123456");

    // A reloaded store over the same database behaves identically.
    drop(store);
    let mut reloaded = AccountStore::open(repo).await.unwrap();
    assert_eq!(reloaded.accounts().len(), 1);
    assert_eq!(reloaded.current_user().unwrap().name, "Alex J.");

    reloaded.logout().await.unwrap();
    reloaded
        .login("alex.johnson@gmail.com", "123456")
        .await
        .unwrap();
    assert!(reloaded.is_authenticated());
}

#[tokio::test]
async fn two_accounts_keep_separate_identities() {
    let repo = StateRepository::in_memory().await.unwrap();
    let mut store = AccountStore::open(repo).await.unwrap();

    store
        .register("Alex", "alex@gmail.com", "123456")
        .await
        .unwrap();
    store
        .register("Sam", "sam@gmail.com", "654321")
        .await
        .unwrap();

    // Registration switched the session to the most recent account.
    assert_eq!(store.current_user().unwrap().name, "Sam");
    assert_eq!(store.accounts().len(), 2);

    // Sam cannot take Alex's email.
    let err = store.update_profile("Sam", "alex@gmail.com", None).await;
    assert!(matches!(err, Err(Error::DuplicateAccount { .. })));

    // Alex can still sign in with the original credentials.
    store.login("alex@gmail.com", "123456").await.unwrap();
    assert_eq!(store.current_user().unwrap().name, "Alex");
}
