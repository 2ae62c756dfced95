use quotebook_core::db::open_db_in_memory;
use quotebook_core::{
    EntityRepository, Member, MemberRepository, MemberService, MemberServiceError, RepoError,
    SqliteMemberRepository, ValidationError,
};

#[test]
fn join_and_find_by_username() {
    let conn = open_db_in_memory().unwrap();
    let service = MemberService::new(SqliteMemberRepository::try_new(&conn).unwrap());

    let joined = service.join("user1", "1234", "유저1").unwrap();
    assert_eq!(joined.id(), 1);

    let found = service.find_by_username("user1").unwrap().unwrap();
    assert_eq!(found, joined);
    assert!(service.find_by_username("nobody").unwrap().is_none());
}

#[test]
fn username_lookup_is_exact_match() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);

    repo.save(&mut Member::new("user2", "1234", "유저2")).unwrap();

    assert!(repo.find_by_username("USER2").unwrap().is_none());
    assert!(repo.find_by_username("user").unwrap().is_none());
}

#[test]
fn duplicate_username_is_unique_violation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);

    repo.save(&mut Member::new("admin", "1234", "관리자")).unwrap();
    let err = repo
        .save(&mut Member::new("admin", "other", "copy"))
        .unwrap_err();

    assert!(matches!(err, RepoError::UniqueViolation(_)), "got {err}");
    assert_eq!(repo.count().unwrap(), 1);
}

#[test]
fn blank_username_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);

    let err = repo.save(&mut Member::new(" ", "1234", "x")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::BlankUsername)
    ));
}

#[test]
fn change_nickname_updates_only_nickname() {
    let conn = open_db_in_memory().unwrap();
    let service = MemberService::new(SqliteMemberRepository::new(&conn));

    let original = service.join("user3", "1234", "유저3").unwrap();
    let renamed = service.change_nickname("user3", "renamed").unwrap();

    assert_eq!(renamed.id(), original.id());
    assert_eq!(renamed.username, "user3");
    assert_eq!(renamed.password, "1234");
    assert_eq!(renamed.nickname, "renamed");
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn change_nickname_of_unknown_member_fails() {
    let conn = open_db_in_memory().unwrap();
    let service = MemberService::new(SqliteMemberRepository::new(&conn));

    let err = service.change_nickname("ghost", "boo").unwrap_err();
    assert!(matches!(err, MemberServiceError::UnknownUsername(ref name) if name == "ghost"));
}

#[test]
fn delete_and_delete_all() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);

    let mut first = Member::new("a", "p", "n");
    repo.save(&mut first).unwrap();
    repo.save(&mut Member::new("b", "p", "n")).unwrap();
    repo.save(&mut Member::new("c", "p", "n")).unwrap();

    repo.delete(&first).unwrap();
    assert!(repo.find_by_id(first.id()).unwrap().is_none());
    assert_eq!(repo.find_all().unwrap().len(), 2);

    assert_eq!(repo.delete_all().unwrap(), 2);
    assert_eq!(repo.count().unwrap(), 0);
}

#[test]
fn save_of_deleted_member_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);

    let mut member = Member::new("gone", "p", "n");
    repo.save(&mut member).unwrap();
    repo.delete(&member).unwrap();

    member.nickname = "again".to_string();
    let err = repo.save(&mut member).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(1)));
    assert_eq!(repo.count().unwrap(), 0);
}
