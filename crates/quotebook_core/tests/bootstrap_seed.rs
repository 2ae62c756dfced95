use quotebook_core::bootstrap::{RENAMED_NICKNAME, SEED_MEMBERS};
use quotebook_core::db::open_db_in_memory;
use quotebook_core::{
    run_bootstrap, BootstrapError, BootstrapStage, EntityRepository, Member, MemberRepository,
    SqliteMemberRepository,
};

#[test]
fn bootstrap_on_empty_store_seeds_five_members_and_renames_user2() {
    let mut conn = open_db_in_memory().unwrap();

    let report = run_bootstrap(&mut conn).unwrap();
    assert_eq!(report.members_created, 5);
    assert_eq!(report.stage, BootstrapStage::User2Updated);

    let repo = SqliteMemberRepository::new(&conn);
    let usernames: Vec<_> = repo
        .find_all()
        .unwrap()
        .into_iter()
        .map(|member| member.username)
        .collect();
    let expected: Vec<_> = SEED_MEMBERS
        .iter()
        .map(|(username, _, _)| username.to_string())
        .collect();
    assert_eq!(usernames, expected);

    let user2 = repo.find_by_username("user2").unwrap().unwrap();
    assert_eq!(user2.nickname, "유저2 New");
    assert_eq!(user2.nickname, RENAMED_NICKNAME);

    let user1 = repo.find_by_username("user1").unwrap().unwrap();
    assert_eq!(user1.nickname, "유저1");
}

#[test]
fn second_bootstrap_creates_nothing_but_still_renames() {
    let mut conn = open_db_in_memory().unwrap();
    run_bootstrap(&mut conn).unwrap();

    conn.execute(
        "UPDATE members SET nickname = 'reverted' WHERE username = 'user2';",
        [],
    )
    .unwrap();

    let report = run_bootstrap(&mut conn).unwrap();
    assert_eq!(report.members_created, 0);
    assert_eq!(report.stage, BootstrapStage::User2Updated);

    let repo = SqliteMemberRepository::new(&conn);
    assert_eq!(repo.count().unwrap(), 5);
    assert_eq!(
        repo.find_by_username("user2").unwrap().unwrap().nickname,
        RENAMED_NICKNAME
    );
}

#[test]
fn non_empty_store_without_user2_is_fatal() {
    let mut conn = open_db_in_memory().unwrap();
    SqliteMemberRepository::new(&conn)
        .save(&mut Member::new("someone", "pw", "nick"))
        .unwrap();

    let err = run_bootstrap(&mut conn).unwrap_err();
    assert!(matches!(err, BootstrapError::MissingSeedMember(ref name) if name == "user2"));

    let repo = SqliteMemberRepository::new(&conn);
    assert_eq!(repo.count().unwrap(), 1);
}
