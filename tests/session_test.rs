//! Unit-of-work behavior: set-based writes, identity-map staleness, and
//! explicit invalidation.

mod common;

use roster::sql::Assignment;
use roster::{AppError, FilterBuilder, MemberFilter, SearchService, Session};
use sqlx::PgPool;

#[sqlx::test]
async fn bulk_update_reports_affected_rows(pool: PgPool) -> Result<(), AppError> {
    let tables = common::setup(&pool).await;
    common::seed(&pool, &tables).await;

    let mut session = Session::begin(&pool, tables.clone()).await?;
    let filter = FilterBuilder::new().age_loe(Some(27)).build();
    let affected = session
        .update_members_where(&filter, &[Assignment::Username("retired".into())])
        .await?;
    assert_eq!(affected, 2); // ages 10 and 20
    session.commit().await?;

    let mut session = Session::begin(&pool, tables).await?;
    let renamed = session.members_by_username("retired").await?;
    assert_eq!(renamed.len(), 2);
    Ok(())
}

#[sqlx::test]
async fn cached_row_is_stale_after_bulk_write_until_cleared(
    pool: PgPool,
) -> Result<(), AppError> {
    let tables = common::setup(&pool).await;
    let seed = common::seed(&pool, &tables).await;

    let mut session = Session::begin(&pool, tables).await?;
    // Prime the identity map.
    let before = session.find_member(seed.member_a.id).await?.expect("memberA");
    assert_eq!(before.age, 10);

    let affected = session
        .update_members_where(&MemberFilter::matches_all(), &[Assignment::AgeAdd(1)])
        .await?;
    assert_eq!(affected, 4);

    // The set-based write bypassed the identity map: the cached row still
    // carries its pre-write age.
    let stale = session.find_member(seed.member_a.id).await?.expect("memberA");
    assert_eq!(stale.age, 10);

    // Explicit invalidation, then a fresh read surfaces the new value.
    session.clear();
    let fresh = session.find_member(seed.member_a.id).await?.expect("memberA");
    assert_eq!(fresh.age, 11);

    session.rollback().await?;
    Ok(())
}

#[sqlx::test]
async fn bulk_delete_removes_matching_rows(pool: PgPool) -> Result<(), AppError> {
    let tables = common::setup(&pool).await;
    common::seed(&pool, &tables).await;

    let mut session = Session::begin(&pool, tables.clone()).await?;
    let filter = FilterBuilder::new().age_loe(Some(19)).build();
    let affected = session.delete_members_where(&filter).await?;
    assert_eq!(affected, 1); // only memberA (10)
    session.commit().await?;

    let remaining =
        SearchService::count(&pool, &tables, &MemberFilter::matches_all()).await?;
    assert_eq!(remaining, 3);
    Ok(())
}

#[sqlx::test]
async fn bulk_delete_with_team_filter_uses_the_reference(pool: PgPool) -> Result<(), AppError> {
    let tables = common::setup(&pool).await;
    common::seed(&pool, &tables).await;

    let mut session = Session::begin(&pool, tables.clone()).await?;
    let filter = FilterBuilder::new().team_name_eq(Some("teamB")).build();
    let affected = session.delete_members_where(&filter).await?;
    assert_eq!(affected, 2); // memberC and memberD
    session.commit().await?;

    let remaining =
        SearchService::count(&pool, &tables, &MemberFilter::matches_all()).await?;
    assert_eq!(remaining, 2);
    Ok(())
}

#[sqlx::test]
async fn rollback_discards_bulk_writes(pool: PgPool) -> Result<(), AppError> {
    let tables = common::setup(&pool).await;
    common::seed(&pool, &tables).await;

    let mut session = Session::begin(&pool, tables.clone()).await?;
    let affected = session
        .delete_members_where(&MemberFilter::matches_all())
        .await?;
    assert_eq!(affected, 4);
    session.rollback().await?;

    let total = SearchService::count(&pool, &tables, &MemberFilter::matches_all()).await?;
    assert_eq!(total, 4);
    Ok(())
}

#[sqlx::test]
async fn find_of_missing_row_is_none_not_an_error(pool: PgPool) -> Result<(), AppError> {
    let tables = common::setup(&pool).await;

    let mut session = Session::begin(&pool, tables).await?;
    assert!(session.find_member(424242).await?.is_none());
    assert!(session.find_team(424242).await?.is_none());
    Ok(())
}

#[sqlx::test]
async fn empty_assignment_list_touches_nothing(pool: PgPool) -> Result<(), AppError> {
    let tables = common::setup(&pool).await;
    common::seed(&pool, &tables).await;

    let mut session = Session::begin(&pool, tables).await?;
    let affected = session
        .update_members_where(&MemberFilter::matches_all(), &[])
        .await?;
    assert_eq!(affected, 0);
    Ok(())
}

#[sqlx::test]
async fn members_by_username_refreshes_the_identity_map(pool: PgPool) -> Result<(), AppError> {
    let tables = common::setup(&pool).await;
    let seed = common::seed(&pool, &tables).await;

    let mut session = Session::begin(&pool, tables).await?;
    session.find_member(seed.member_a.id).await?;
    session
        .update_members_where(
            &FilterBuilder::new().username_eq(Some("memberA")).build(),
            &[Assignment::Age(99)],
        )
        .await?;

    // A query-backed lookup re-reads the database and refreshes the map.
    let rows = session.members_by_username("memberA").await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].age, 99);
    let refreshed = session.find_member(seed.member_a.id).await?.expect("memberA");
    assert_eq!(refreshed.age, 99);
    Ok(())
}
