#![allow(dead_code)]

use roster::{ensure_tables, Member, Session, Tables, Team};
use sqlx::PgPool;

pub const SCHEMA: &str = "roster";

pub async fn setup(pool: &PgPool) -> Tables {
    ensure_tables(pool, SCHEMA).await.expect("ensure tables");
    Tables::new(SCHEMA)
}

pub struct Seed {
    pub team_a: Team,
    pub team_b: Team,
    pub member_a: Member,
    pub member_b: Member,
    pub member_c: Member,
    pub member_d: Member,
}

/// teamA/teamB with two members each: memberA(10) and memberB(20) in teamA,
/// memberC(30) and memberD(40) in teamB.
pub async fn seed(pool: &PgPool, tables: &Tables) -> Seed {
    let mut session = Session::begin(pool, tables.clone()).await.expect("begin");
    let team_a = session.insert_team("teamA").await.expect("teamA");
    let team_b = session.insert_team("teamB").await.expect("teamB");
    let member_a = session
        .insert_member("memberA", 10, Some(team_a.id))
        .await
        .expect("memberA");
    let member_b = session
        .insert_member("memberB", 20, Some(team_a.id))
        .await
        .expect("memberB");
    let member_c = session
        .insert_member("memberC", 30, Some(team_b.id))
        .await
        .expect("memberC");
    let member_d = session
        .insert_member("memberD", 40, Some(team_b.id))
        .await
        .expect("memberD");
    session.commit().await.expect("commit");
    Seed {
        team_a,
        team_b,
        member_a,
        member_b,
        member_c,
        member_d,
    }
}
