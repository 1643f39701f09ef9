use newsroom_news::domain::types::{OtpPurpose, OutgoingEmail};
use newsroom_news::error::NewsServiceError;
use newsroom_news::usecase::email_verification::{
    ConfirmEmailVerificationInput, ConfirmEmailVerificationUseCase,
    RequestEmailVerificationUseCase,
};
use newsroom_news::usecase::otp::OtpLedger;

use crate::helpers::{MockOtpRepo, MockUserRepo, RecordingMailer, StubGenerator, test_user};

fn request_uc(
    users: &MockUserRepo,
    otps: &MockOtpRepo,
    mailer: &RecordingMailer,
    code: &'static str,
) -> RequestEmailVerificationUseCase<MockUserRepo, MockOtpRepo, StubGenerator, RecordingMailer> {
    RequestEmailVerificationUseCase {
        users: users.clone(),
        ledger: OtpLedger {
            otps: otps.clone(),
            generator: StubGenerator(code),
        },
        mailer: mailer.clone(),
    }
}

fn confirm_uc(
    users: &MockUserRepo,
    otps: &MockOtpRepo,
) -> ConfirmEmailVerificationUseCase<MockUserRepo, MockOtpRepo, StubGenerator> {
    ConfirmEmailVerificationUseCase {
        users: users.clone(),
        ledger: OtpLedger {
            otps: otps.clone(),
            generator: StubGenerator("0000"),
        },
    }
}

fn confirm_input(email: &str, otp: &str) -> ConfirmEmailVerificationInput {
    ConfirmEmailVerificationInput {
        email: email.to_owned(),
        otp: otp.to_owned(),
    }
}

#[tokio::test]
async fn should_verify_email_with_mailed_code() {
    let user = test_user("jamie@example.com", "password1").await;
    let users = MockUserRepo::new(vec![user.clone()]);
    let otps = MockOtpRepo::empty();
    let mailer = RecordingMailer::default();
    let sent = mailer.sent_handle();

    request_uc(&users, &otps, &mailer, "1234")
        .execute("jamie@example.com")
        .await
        .unwrap();

    {
        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "jamie@example.com");
        assert_eq!(
            sent[0].1,
            OutgoingEmail::Verification {
                name: user.name.clone(),
                otp: "1234".to_owned(),
            }
        );
    }

    let wrong = confirm_uc(&users, &otps)
        .execute(confirm_input("jamie@example.com", "0000"))
        .await;
    assert!(
        matches!(wrong, Err(NewsServiceError::InvalidOrExpiredOtp)),
        "expected InvalidOrExpiredOtp, got {wrong:?}"
    );
    assert!(!users.users_handle().lock().unwrap()[0].is_verified);

    confirm_uc(&users, &otps)
        .execute(confirm_input("jamie@example.com", "1234"))
        .await
        .unwrap();

    assert!(users.users_handle().lock().unwrap()[0].is_verified);
    let remaining = otps.otps_handle();
    assert!(
        remaining
            .lock()
            .unwrap()
            .iter()
            .all(|o| o.purpose != OtpPurpose::EmailVerification),
        "confirmed verification code should be deleted"
    );

    let again = request_uc(&users, &otps, &mailer, "5678")
        .execute("jamie@example.com")
        .await;
    assert!(
        matches!(again, Err(NewsServiceError::EmailAlreadyVerified)),
        "expected EmailAlreadyVerified, got {again:?}"
    );
    assert_eq!(sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_email() {
    let users = MockUserRepo::empty();
    let otps = MockOtpRepo::empty();
    let mailer = RecordingMailer::default();

    let result = request_uc(&users, &otps, &mailer, "1234")
        .execute("nobody@example.com")
        .await;

    assert!(
        matches!(result, Err(NewsServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
    assert!(otps.otps_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_only_accept_latest_code_after_resend() {
    let user = test_user("jamie@example.com", "password1").await;
    let users = MockUserRepo::new(vec![user]);
    let otps = MockOtpRepo::empty();
    let mailer = RecordingMailer::default();

    request_uc(&users, &otps, &mailer, "1111")
        .execute("jamie@example.com")
        .await
        .unwrap();
    request_uc(&users, &otps, &mailer, "2222")
        .execute("jamie@example.com")
        .await
        .unwrap();

    let stale = confirm_uc(&users, &otps)
        .execute(confirm_input("jamie@example.com", "1111"))
        .await;
    assert!(
        matches!(stale, Err(NewsServiceError::InvalidOrExpiredOtp)),
        "expected InvalidOrExpiredOtp, got {stale:?}"
    );

    confirm_uc(&users, &otps)
        .execute(confirm_input("jamie@example.com", "2222"))
        .await
        .unwrap();
}

#[tokio::test]
async fn should_report_invalid_code_when_none_was_requested() {
    let user = test_user("jamie@example.com", "password1").await;
    let users = MockUserRepo::new(vec![user]);

    let result = confirm_uc(&users, &MockOtpRepo::empty())
        .execute(confirm_input("jamie@example.com", "1234"))
        .await;

    assert!(
        matches!(result, Err(NewsServiceError::InvalidOrExpiredOtp)),
        "expected InvalidOrExpiredOtp, got {result:?}"
    );
}

#[tokio::test]
async fn should_surface_delivery_failure() {
    let user = test_user("jamie@example.com", "password1").await;
    let users = MockUserRepo::new(vec![user]);
    let otps = MockOtpRepo::empty();

    let result = request_uc(&users, &otps, &RecordingMailer::failing(), "1234")
        .execute("jamie@example.com")
        .await;

    assert!(
        matches!(result, Err(NewsServiceError::EmailDelivery(_))),
        "expected EmailDelivery, got {result:?}"
    );
}
