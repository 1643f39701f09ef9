use std::sync::Arc;

use newsroom_auth_types::token::SessionIssuer;
use newsroom_news::domain::repository::PasswordHasher;
use newsroom_news::error::NewsServiceError;
use newsroom_news::infra::password::BcryptHasher;
use newsroom_news::usecase::auth::{
    GetProfileUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};

use crate::helpers::{MockUserRepo, TEST_JWT_SECRET, test_hasher, test_user};

fn issuer() -> Arc<SessionIssuer> {
    Arc::new(SessionIssuer::new(TEST_JWT_SECRET))
}

fn login_uc(users: MockUserRepo) -> LoginUseCase<MockUserRepo, BcryptHasher> {
    LoginUseCase {
        users,
        hasher: test_hasher(),
        session: issuer(),
    }
}

#[tokio::test]
async fn should_register_unverified_user_with_hashed_password() {
    let repo = MockUserRepo::empty();
    let users = repo.users_handle();

    let uc = RegisterUseCase {
        users: repo,
        hasher: test_hasher(),
    };
    let user = uc
        .execute(RegisterInput {
            name: "Jamie Reporter".to_owned(),
            email: "jamie@example.com".to_owned(),
            password: "correct horse".to_owned(),
        })
        .await
        .unwrap();

    assert!(!user.is_verified);
    assert_ne!(user.password_hash, "correct horse");
    assert!(
        test_hasher()
            .verify("correct horse", &user.password_hash)
            .await
            .unwrap()
    );
    assert_eq!(users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_duplicate_email_on_register() {
    let existing = test_user("jamie@example.com", "password1").await;
    let repo = MockUserRepo::new(vec![existing]);
    let users = repo.users_handle();

    let uc = RegisterUseCase {
        users: repo,
        hasher: test_hasher(),
    };
    let result = uc
        .execute(RegisterInput {
            name: "Someone Else".to_owned(),
            email: "jamie@example.com".to_owned(),
            password: "password2".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(NewsServiceError::EmailTaken)),
        "expected EmailTaken, got {result:?}"
    );
    assert_eq!(users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_issue_session_bound_to_user_on_login() {
    let user = test_user("jamie@example.com", "password1").await;

    let out = login_uc(MockUserRepo::new(vec![user.clone()]))
        .execute(LoginInput {
            email: user.email.clone(),
            password: "password1".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(out.user.id, user.id);
    assert!(out.session.expires_at > out.session.issued_at);
    let subject = issuer().validate(&out.session.token).unwrap();
    assert_eq!(subject, user.id);
}

#[tokio::test]
async fn should_not_distinguish_unknown_email_from_wrong_password() {
    let user = test_user("jamie@example.com", "password1").await;
    let uc = login_uc(MockUserRepo::new(vec![user]));

    let wrong_password = uc
        .execute(LoginInput {
            email: "jamie@example.com".to_owned(),
            password: "password2".to_owned(),
        })
        .await;
    let unknown_email = uc
        .execute(LoginInput {
            email: "nobody@example.com".to_owned(),
            password: "password1".to_owned(),
        })
        .await;

    for result in [wrong_password, unknown_email] {
        assert!(
            matches!(result, Err(NewsServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
    }
}

#[tokio::test]
async fn should_allow_login_before_email_verification() {
    let user = test_user("jamie@example.com", "password1").await;
    assert!(!user.is_verified);

    let result = login_uc(MockUserRepo::new(vec![user]))
        .execute(LoginInput {
            email: "jamie@example.com".to_owned(),
            password: "password1".to_owned(),
        })
        .await;

    assert!(result.is_ok(), "unverified users may log in, got {result:?}");
}

#[tokio::test]
async fn should_return_profile_for_session_user() {
    let user = test_user("jamie@example.com", "password1").await;
    let uc = GetProfileUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let profile = uc.execute(user.id).await.unwrap();
    assert_eq!(profile.email, "jamie@example.com");
}

#[tokio::test]
async fn should_treat_deleted_user_as_unauthorized() {
    let uc = GetProfileUseCase {
        users: MockUserRepo::empty(),
    };

    let result = uc.execute(uuid::Uuid::now_v7()).await;
    assert!(
        matches!(result, Err(NewsServiceError::Unauthorized)),
        "expected Unauthorized, got {result:?}"
    );
}
