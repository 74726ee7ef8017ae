//! Tests for the account service.

use std::sync::Arc;

use argon2::{Algorithm, Argon2, Params, Version};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockUserRepository, StoredCredentials};

const PASSWORD: &str = "correct horse";

#[fixture]
fn teacher() -> User {
    User::try_from_parts(1, "teacher1", Some("MATH")).expect("valid user")
}

#[fixture]
fn stored(teacher: User) -> StoredCredentials {
    let params = Params::new(8, 1, 1, None).expect("valid params");
    let hasher = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    StoredCredentials {
        user: teacher,
        password_digest: PasswordDigest::hash_with(&hasher, PASSWORD).expect("hash"),
    }
}

fn credentials(username: &str, password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts(username, password).expect("credential shape")
}

fn service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo))
}

#[rstest]
#[tokio::test]
async fn authenticate_returns_profile_for_matching_password(
    stored: StoredCredentials,
    teacher: User,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_credentials()
        .withf(|username| username == "teacher1")
        .times(1)
        .return_once(move |_| Ok(Some(stored)));

    let user = service(repo)
        .authenticate(&credentials("teacher1", PASSWORD))
        .await
        .expect("login succeeds");
    assert_eq!(user, teacher);
}

#[rstest]
#[tokio::test]
async fn wrong_password_and_unknown_user_fail_identically(stored: StoredCredentials) {
    let mut known = MockUserRepository::new();
    known
        .expect_find_credentials()
        .return_once(move |_| Ok(Some(stored)));
    let mut unknown = MockUserRepository::new();
    unknown.expect_find_credentials().return_once(|_| Ok(None));

    let wrong_password = service(known)
        .authenticate(&credentials("teacher1", "nope"))
        .await
        .expect_err("wrong password");
    let missing_user = service(unknown)
        .authenticate(&credentials("ghost", "nope"))
        .await
        .expect_err("unknown user");

    assert_eq!(wrong_password.code(), ErrorCode::Unauthorized);
    assert_eq!(wrong_password.message(), missing_user.message());
    assert_eq!(wrong_password.code(), missing_user.code());
}

#[rstest]
#[case(UserPersistenceError::connection("down"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_failures_are_mapped(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_credentials()
        .return_once(move |_| Err(failure));

    let err = service(repo)
        .authenticate(&credentials("teacher1", PASSWORD))
        .await
        .expect_err("repository failure");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn connection_details_stay_out_of_the_response() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_credentials()
        .return_once(|_| Err(UserPersistenceError::connection("db01.internal:5432 refused")));

    let err = service(repo)
        .authenticate(&credentials("teacher1", PASSWORD))
        .await
        .expect_err("repository failure");
    assert_eq!(err.message(), "user repository unavailable");
}

#[rstest]
#[tokio::test]
async fn find_user_passes_through_lookup(teacher: User) {
    let id = teacher.id();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .withf(move |candidate| *candidate == id)
        .times(1)
        .return_once(move |_| Ok(Some(teacher)));

    let found = service(repo).find_user(&id).await.expect("lookup");
    assert_eq!(found.map(|user| user.id()), Some(id));
}

#[rstest]
#[tokio::test]
async fn find_user_reports_missing_rows_as_none() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));

    let id = UserId::new(99).expect("id");
    assert!(service(repo).find_user(&id).await.expect("lookup").is_none());
}
