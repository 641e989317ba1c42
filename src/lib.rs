//! Roster: member/team search service over PostgreSQL.
//!
//! Dynamic search conditions compile into parameterized SQL (left join of
//! member onto team, projected into a flat DTO), with simple and
//! count-eliding pagination strategies and set-based bulk mutation through
//! an explicit unit of work.

pub mod dto;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod paging;
pub mod routes;
pub mod service;
pub mod session;
pub mod sql;
pub mod state;
pub mod store;

pub use dto::{MemberSearchCondition, MemberTeamDto};
pub use entity::{Member, Team};
pub use error::AppError;
pub use paging::{Page, PageRequest, Sort, SortKey};
pub use routes::{common_routes_with_ready, member_routes};
pub use service::SearchService;
pub use session::Session;
pub use sql::{FilterBuilder, MemberFilter};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables, Tables};
