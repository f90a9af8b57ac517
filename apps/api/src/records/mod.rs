// Interview records: the consent-gated PostgreSQL mirror of finished
// interviews and the post-interview self-assessment.

pub mod evaluation;
pub mod handlers;
pub mod review;
pub mod store;
