//! Dynamic predicate construction from a sparse search condition.
//!
//! Two construction routes exist and must stay behaviorally identical: an
//! accumulating [`FilterBuilder`] and a set of independent nullable
//! factories ([`MemberFilter::from_factories`]). Both reduce a condition to
//! the conjunction of only its present constraints; no constraints at all
//! means "match every row".

use crate::dto::MemberSearchCondition;

/// One atomic comparison over a member row. The team name comparison goes
/// through the member's team reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    UsernameEq(String),
    TeamNameEq(String),
    AgeGoe(i32),
    AgeLoe(i32),
}

/// Conjunction of atomic predicates. Empty = universal predicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberFilter {
    predicates: Vec<Predicate>,
}

impl MemberFilter {
    /// The universal predicate: matches every row.
    pub fn matches_all() -> Self {
        Self::default()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Accumulating strategy: start from "match everything" and conjunct
    /// each present constraint in sequence.
    pub fn from_builder(cond: &MemberSearchCondition) -> Self {
        FilterBuilder::new()
            .username_eq(cond.username.as_deref())
            .team_name_eq(cond.team_name.as_deref())
            .age_goe(cond.age_goe)
            .age_loe(cond.age_loe)
            .build()
    }

    /// Independent-factory strategy: one nullable factory per field, absent
    /// entries discarded, the rest conjuncted.
    pub fn from_factories(cond: &MemberSearchCondition) -> Self {
        [
            username_eq(cond),
            team_name_eq(cond),
            age_goe(cond),
            age_loe(cond),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl FromIterator<Predicate> for MemberFilter {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        MemberFilter {
            predicates: iter.into_iter().collect(),
        }
    }
}

fn username_eq(cond: &MemberSearchCondition) -> Option<Predicate> {
    cond.username.clone().map(Predicate::UsernameEq)
}

fn team_name_eq(cond: &MemberSearchCondition) -> Option<Predicate> {
    cond.team_name.clone().map(Predicate::TeamNameEq)
}

fn age_goe(cond: &MemberSearchCondition) -> Option<Predicate> {
    cond.age_goe.map(Predicate::AgeGoe)
}

fn age_loe(cond: &MemberSearchCondition) -> Option<Predicate> {
    cond.age_loe.map(Predicate::AgeLoe)
}

/// Accumulating filter builder. A fresh builder matches everything; each
/// `Some` input conjuncts one more constraint.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    predicates: Vec<Predicate>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn username_eq(self, username: Option<&str>) -> Self {
        match username {
            Some(u) => self.and(Predicate::UsernameEq(u.to_string())),
            None => self,
        }
    }

    pub fn team_name_eq(self, team_name: Option<&str>) -> Self {
        match team_name {
            Some(t) => self.and(Predicate::TeamNameEq(t.to_string())),
            None => self,
        }
    }

    pub fn age_goe(self, bound: Option<i32>) -> Self {
        match bound {
            Some(b) => self.and(Predicate::AgeGoe(b)),
            None => self,
        }
    }

    pub fn age_loe(self, bound: Option<i32>) -> Self {
        match bound {
            Some(b) => self.and(Predicate::AgeLoe(b)),
            None => self,
        }
    }

    pub fn build(self) -> MemberFilter {
        MemberFilter {
            predicates: self.predicates,
        }
    }
}
