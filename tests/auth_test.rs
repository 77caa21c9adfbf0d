//! Scenario tests for sessions, route gates, roles and auth flows.

mod helpers;

use campushub_auth::guard::{self, Access, Route};
use campushub_auth::SessionStore;
use campushub_core::error::ErrorKind;
use campushub_core::types::{OAuthCredential, UserId};
use campushub_service::{ChangePasswordRequest, SignInRequest, SignUpRequest, ViewState};

fn sign_up() -> SignUpRequest {
    SignUpRequest {
        name: "Asha Rao".into(),
        email: "asha@example.com".into(),
        password: "secret1".into(),
        phone: String::new(),
        city: "Pune".into(),
        college: "COEP".into(),
        remember_me: true,
    }
}

#[tokio::test]
async fn test_session_store_settles_and_follows_sign_in() {
    let app = helpers::TestApp::new();
    let sessions = SessionStore::start(app.provider());

    let settled = sessions.settled().await.unwrap();
    assert!(!settled.loading);
    assert!(!settled.is_signed_in());
    assert_eq!(guard::protected(&settled), Access::Redirect(Route::Login));
    assert_eq!(guard::guest(&settled), Access::Allow);

    let service = app.auth_service();
    service.sign_up(&sign_up()).await.unwrap();
    let signed_in = sessions.wait_until(|s| s.is_signed_in()).await.unwrap();
    assert_eq!(guard::protected(&signed_in), Access::Allow);
    assert_eq!(guard::guest(&signed_in), Access::Redirect(Route::Dashboard));
    assert_eq!(
        guard::admin(&signed_in, Some(false)),
        Access::Redirect(Route::Dashboard)
    );
    assert_eq!(guard::admin(&signed_in, None), Access::Pending);

    service.sign_out().await.unwrap();
    let signed_out = sessions.wait_until(|s| !s.is_signed_in()).await.unwrap();
    assert_eq!(guard::protected(&signed_out), Access::Redirect(Route::Login));
}

#[tokio::test]
async fn test_sign_in_creates_missing_profile() {
    let app = helpers::TestApp::new();
    let service = app.auth_service();
    let session = service.sign_up(&sign_up()).await.unwrap();
    let uid = session.user.uid.clone();
    service.sign_out().await.unwrap();

    let session = service
        .sign_in(&SignInRequest {
            email: "asha@example.com".into(),
            password: "secret1".into(),
            remember_me: false,
        })
        .await
        .unwrap();
    assert_eq!(session.user.uid, uid);

    let profile = app.profiles().load(&uid).await.unwrap();
    let ViewState::Ready(profile) = profile else {
        panic!("expected a profile, got {profile:?}");
    };
    assert_eq!(profile.city.as_deref(), Some("Pune"));
    assert_eq!(profile.name.as_deref(), Some("Asha Rao"));
}

#[tokio::test]
async fn test_unknown_profile_is_no_data_yet() {
    let app = helpers::TestApp::new();
    let state = app.profiles().load(&UserId::new("nobody")).await.unwrap();
    assert_eq!(state, ViewState::NotFound);
}

#[tokio::test]
async fn test_admin_grant_is_per_user() {
    let app = helpers::TestApp::new();
    let gate = app.admin_gate();
    let admin = UserId::new("uid-123");
    let student = UserId::new("uid-456");

    assert!(!gate.is_admin(&admin).await.unwrap());
    gate.grant_admin(&admin).await.unwrap();
    assert!(gate.is_admin(&admin).await.unwrap());
    assert!(!gate.is_admin(&student).await.unwrap());

    gate.revoke_admin(&admin).await.unwrap();
    assert!(!gate.is_admin(&admin).await.unwrap());
}

#[tokio::test]
async fn test_change_password_rejects_oauth_only_account() {
    let app = helpers::TestApp::new();
    let service = app.auth_service();
    service
        .sign_in_with_oauth(
            OAuthCredential {
                provider: "google.com".into(),
                subject: "g-42".into(),
                email: Some("oauth@example.com".into()),
                email_verified: true,
                display_name: Some("OAuth User".into()),
            },
            true,
        )
        .await
        .unwrap();

    let err = service
        .change_password(&ChangePasswordRequest {
            current_password: "anything".into(),
            new_password: "secret2".into(),
            confirm_password: "secret2".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert!(err.message.contains("email/password"));
}

#[tokio::test]
async fn test_change_password_then_sign_in_with_new_one() {
    let app = helpers::TestApp::new();
    let service = app.auth_service();
    service.sign_up(&sign_up()).await.unwrap();

    let same = ChangePasswordRequest {
        current_password: "secret1".into(),
        new_password: "secret1".into(),
        confirm_password: "secret1".into(),
    };
    assert_eq!(
        service.change_password(&same).await.unwrap_err().kind,
        ErrorKind::Validation
    );

    let short = ChangePasswordRequest {
        new_password: "abc".into(),
        confirm_password: "abc".into(),
        ..same.clone()
    };
    assert_eq!(
        service.change_password(&short).await.unwrap_err().kind,
        ErrorKind::Validation
    );

    service
        .change_password(&ChangePasswordRequest {
            new_password: "secret2".into(),
            confirm_password: "secret2".into(),
            ..same
        })
        .await
        .unwrap();
    service.sign_out().await.unwrap();

    let request = |password: &str| SignInRequest {
        email: "asha@example.com".into(),
        password: password.into(),
        remember_me: true,
    };
    assert_eq!(
        service.sign_in(&request("secret1")).await.unwrap_err().kind,
        ErrorKind::Authentication
    );
    service.sign_in(&request("secret2")).await.unwrap();
}
