use std::sync::Arc;

use newsroom_auth_types::token::SessionIssuer;
use newsroom_news::domain::types::{OtpPurpose, OutgoingEmail};
use newsroom_news::error::NewsServiceError;
use newsroom_news::infra::password::BcryptHasher;
use newsroom_news::usecase::auth::{LoginInput, LoginUseCase};
use newsroom_news::usecase::otp::OtpLedger;
use newsroom_news::usecase::password_reset::{
    ConfirmPasswordResetOtpInput, ConfirmPasswordResetOtpUseCase, RequestPasswordResetUseCase,
    ResetPasswordInput, ResetPasswordUseCase,
};

use crate::helpers::{
    MockOtpRepo, MockUserRepo, RecordingMailer, StubGenerator, TEST_JWT_SECRET, test_hasher,
    test_user,
};

fn request_uc(
    users: &MockUserRepo,
    otps: &MockOtpRepo,
    mailer: &RecordingMailer,
) -> RequestPasswordResetUseCase<MockUserRepo, MockOtpRepo, StubGenerator, RecordingMailer> {
    RequestPasswordResetUseCase {
        users: users.clone(),
        ledger: OtpLedger {
            otps: otps.clone(),
            generator: StubGenerator("4321"),
        },
        mailer: mailer.clone(),
    }
}

fn confirm_uc(
    users: &MockUserRepo,
    otps: &MockOtpRepo,
) -> ConfirmPasswordResetOtpUseCase<MockUserRepo, MockOtpRepo, StubGenerator> {
    ConfirmPasswordResetOtpUseCase {
        users: users.clone(),
        ledger: OtpLedger {
            otps: otps.clone(),
            generator: StubGenerator("0000"),
        },
    }
}

fn reset_uc(
    users: &MockUserRepo,
    otps: &MockOtpRepo,
) -> ResetPasswordUseCase<MockUserRepo, MockOtpRepo, BcryptHasher> {
    ResetPasswordUseCase {
        users: users.clone(),
        otps: otps.clone(),
        hasher: test_hasher(),
    }
}

fn login_uc(users: &MockUserRepo) -> LoginUseCase<MockUserRepo, BcryptHasher> {
    LoginUseCase {
        users: users.clone(),
        hasher: test_hasher(),
        session: Arc::new(SessionIssuer::new(TEST_JWT_SECRET)),
    }
}

fn otp_input(otp: &str) -> ConfirmPasswordResetOtpInput {
    ConfirmPasswordResetOtpInput {
        email: "jamie@example.com".to_owned(),
        otp: otp.to_owned(),
    }
}

fn reset_input(new_password: &str) -> ResetPasswordInput {
    ResetPasswordInput {
        email: "jamie@example.com".to_owned(),
        new_password: new_password.to_owned(),
    }
}

fn login_input(password: &str) -> LoginInput {
    LoginInput {
        email: "jamie@example.com".to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn should_replace_password_after_confirmed_code() {
    let user = test_user("jamie@example.com", "old-password").await;
    let users = MockUserRepo::new(vec![user.clone()]);
    let otps = MockOtpRepo::empty();
    let mailer = RecordingMailer::default();
    let sent = mailer.sent_handle();

    request_uc(&users, &otps, &mailer)
        .execute("jamie@example.com")
        .await
        .unwrap();
    assert_eq!(
        sent.lock().unwrap()[0].1,
        OutgoingEmail::PasswordReset {
            name: user.name.clone(),
            otp: "4321".to_owned(),
        }
    );

    let early = reset_uc(&users, &otps).execute(reset_input("new-password")).await;
    assert!(
        matches!(early, Err(NewsServiceError::OtpNotVerified)),
        "expected OtpNotVerified, got {early:?}"
    );

    confirm_uc(&users, &otps)
        .execute(otp_input("4321"))
        .await
        .unwrap();

    let replay = confirm_uc(&users, &otps).execute(otp_input("4321")).await;
    assert!(
        matches!(replay, Err(NewsServiceError::OtpAlreadyVerified)),
        "expected OtpAlreadyVerified, got {replay:?}"
    );

    reset_uc(&users, &otps)
        .execute(reset_input("new-password"))
        .await
        .unwrap();

    let old = login_uc(&users).execute(login_input("old-password")).await;
    assert!(
        matches!(old, Err(NewsServiceError::InvalidCredentials)),
        "old password must stop working, got {old:?}"
    );
    login_uc(&users)
        .execute(login_input("new-password"))
        .await
        .unwrap();

    assert!(
        otps.otps_handle()
            .lock()
            .unwrap()
            .iter()
            .all(|o| o.purpose != OtpPurpose::PasswordReset),
        "reset code should be consumed"
    );

    let second = reset_uc(&users, &otps)
        .execute(reset_input("third-password"))
        .await;
    assert!(
        matches!(second, Err(NewsServiceError::OtpNotFound)),
        "one confirmation allows one reset, got {second:?}"
    );
}

#[tokio::test]
async fn should_reject_wrong_reset_code() {
    let user = test_user("jamie@example.com", "old-password").await;
    let users = MockUserRepo::new(vec![user]);
    let otps = MockOtpRepo::empty();

    request_uc(&users, &otps, &RecordingMailer::default())
        .execute("jamie@example.com")
        .await
        .unwrap();

    let result = confirm_uc(&users, &otps).execute(otp_input("1111")).await;
    assert!(
        matches!(result, Err(NewsServiceError::InvalidOrExpiredOtp)),
        "expected InvalidOrExpiredOtp, got {result:?}"
    );
    assert!(!otps.otps_handle().lock().unwrap()[0].is_verified);
}

#[tokio::test]
async fn should_not_reset_without_requested_code() {
    let user = test_user("jamie@example.com", "old-password").await;
    let users = MockUserRepo::new(vec![user]);

    let result = reset_uc(&users, &MockOtpRepo::empty())
        .execute(reset_input("new-password"))
        .await;

    assert!(
        matches!(result, Err(NewsServiceError::OtpNotFound)),
        "expected OtpNotFound, got {result:?}"
    );
    login_uc(&users)
        .execute(login_input("old-password"))
        .await
        .unwrap();
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_email() {
    let users = MockUserRepo::empty();
    let otps = MockOtpRepo::empty();

    let request = request_uc(&users, &otps, &RecordingMailer::default())
        .execute("nobody@example.com")
        .await;
    let confirm = confirm_uc(&users, &otps)
        .execute(ConfirmPasswordResetOtpInput {
            email: "nobody@example.com".to_owned(),
            otp: "4321".to_owned(),
        })
        .await;

    assert!(
        matches!(request, Err(NewsServiceError::UserNotFound)),
        "expected UserNotFound, got {request:?}"
    );
    assert!(
        matches!(confirm, Err(NewsServiceError::UserNotFound)),
        "expected UserNotFound, got {confirm:?}"
    );
}
