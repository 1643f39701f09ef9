
mod auth_test;
mod catalog_test;
mod comment_test;
mod email_verification_test;
mod password_reset_test;
mod seed_test;
