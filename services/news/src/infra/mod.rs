pub mod db;
pub mod mailer;
pub mod password;
pub mod storage;
