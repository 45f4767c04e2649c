pub(crate) mod record_deploy;
pub(crate) mod upsert_comment;
pub(crate) mod upsert_pull_request;
pub(crate) mod upsert_repository;
pub(crate) mod upsert_team;
pub(crate) mod upsert_user;

pub use record_deploy::{DeployPayload, RecordDeployInterface};
pub use upsert_comment::UpsertCommentInterface;
pub use upsert_pull_request::UpsertPullRequestInterface;
pub use upsert_repository::UpsertRepositoryInterface;
pub use upsert_team::UpsertTeamInterface;
pub use upsert_user::UpsertUserInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    record_deploy::MockRecordDeployInterface, upsert_comment::MockUpsertCommentInterface,
    upsert_pull_request::MockUpsertPullRequestInterface,
    upsert_repository::MockUpsertRepositoryInterface, upsert_team::MockUpsertTeamInterface,
    upsert_user::MockUpsertUserInterface,
};
