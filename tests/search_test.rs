//! Search queries against a live database: dynamic filters, strategy
//! equivalence, and join behavior.

mod common;

use roster::{
    AppError, MemberFilter, MemberSearchCondition, SearchService, Session, Sort, SortKey,
};
use sqlx::PgPool;

#[sqlx::test]
async fn empty_condition_matches_every_member(pool: PgPool) -> Result<(), AppError> {
    let tables = common::setup(&pool).await;
    common::seed(&pool, &tables).await;

    let filter = MemberFilter::from_factories(&MemberSearchCondition::default());
    let rows = SearchService::search(&pool, &tables, &filter, None).await?;
    assert_eq!(rows.len(), 4);
    Ok(())
}

#[sqlx::test]
async fn age_range_and_team_filters_narrow_the_result(pool: PgPool) -> Result<(), AppError> {
    let tables = common::setup(&pool).await;
    common::seed(&pool, &tables).await;

    let cond = MemberSearchCondition {
        age_goe: Some(20),
        age_loe: Some(40),
        ..Default::default()
    };
    let rows =
        SearchService::search(&pool, &tables, &MemberFilter::from_builder(&cond), None).await?;
    let usernames: Vec<_> = rows.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(usernames, ["memberB", "memberC", "memberD"]);

    let cond = MemberSearchCondition {
        team_name: Some("teamB".into()),
        age_goe: Some(35),
        ..Default::default()
    };
    let rows =
        SearchService::search(&pool, &tables, &MemberFilter::from_builder(&cond), None).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].username, "memberD");
    assert_eq!(rows[0].team_name.as_deref(), Some("teamB"));
    Ok(())
}

#[sqlx::test]
async fn builder_and_factory_strategies_return_identical_rows(
    pool: PgPool,
) -> Result<(), AppError> {
    let tables = common::setup(&pool).await;
    common::seed(&pool, &tables).await;

    let conditions = [
        MemberSearchCondition::default(),
        MemberSearchCondition {
            username: Some("memberA".into()),
            ..Default::default()
        },
        MemberSearchCondition {
            team_name: Some("teamA".into()),
            age_loe: Some(15),
            ..Default::default()
        },
        MemberSearchCondition {
            age_goe: Some(9),
            age_loe: Some(30),
            ..Default::default()
        },
    ];
    for cond in &conditions {
        let via_builder =
            SearchService::search(&pool, &tables, &MemberFilter::from_builder(cond), None).await?;
        let via_factories =
            SearchService::search(&pool, &tables, &MemberFilter::from_factories(cond), None)
                .await?;
        assert_eq!(via_builder, via_factories, "diverged for {cond:?}");
    }
    Ok(())
}

#[sqlx::test]
async fn contradictory_age_range_yields_empty_not_error(pool: PgPool) -> Result<(), AppError> {
    let tables = common::setup(&pool).await;
    common::seed(&pool, &tables).await;

    let cond = MemberSearchCondition {
        age_goe: Some(40),
        age_loe: Some(10),
        ..Default::default()
    };
    let rows =
        SearchService::search(&pool, &tables, &MemberFilter::from_factories(&cond), None).await?;
    assert!(rows.is_empty());
    Ok(())
}

#[sqlx::test]
async fn teamless_member_is_retained_with_null_team(pool: PgPool) -> Result<(), AppError> {
    let tables = common::setup(&pool).await;
    common::seed(&pool, &tables).await;

    let mut session = Session::begin(&pool, tables.clone()).await?;
    session.insert_member("drifter", 25, None).await?;
    session.commit().await?;

    let filter = MemberFilter::matches_all();
    let rows = SearchService::search(&pool, &tables, &filter, None).await?;
    assert_eq!(rows.len(), 5);
    let drifter = rows.iter().find(|r| r.username == "drifter").expect("drifter present");
    assert_eq!(drifter.team_id, None);
    assert_eq!(drifter.team_name, None);
    Ok(())
}

#[sqlx::test]
async fn sort_orders_the_result(pool: PgPool) -> Result<(), AppError> {
    let tables = common::setup(&pool).await;
    common::seed(&pool, &tables).await;

    let rows = SearchService::search(
        &pool,
        &tables,
        &MemberFilter::matches_all(),
        Some(Sort { key: SortKey::Age, descending: true }),
    )
    .await?;
    let ages: Vec<_> = rows.iter().map(|r| r.age).collect();
    assert_eq!(ages, [40, 30, 20, 10]);
    Ok(())
}
