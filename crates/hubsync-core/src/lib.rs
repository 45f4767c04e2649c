//! Logic module.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

mod context;
pub mod errors;
pub mod use_cases;

pub use context::CoreContext;
pub use errors::{DomainError, Result};
use shaku::module;
use use_cases::{
    events::{
        handle_comment_event::HandleCommentEvent,
        handle_pull_request_event::HandlePullRequestEvent,
    },
    hooks::{
        register_organization_hook::RegisterOrganizationHook,
        register_repository_hook::RegisterRepositoryHook,
    },
    sync::{run_full_sync::RunFullSync, synchronize_team::SynchronizeTeam},
    upserts::{
        record_deploy::RecordDeploy, upsert_comment::UpsertComment,
        upsert_pull_request::UpsertPullRequest, upsert_repository::UpsertRepository,
        upsert_team::UpsertTeam, upsert_user::UpsertUser,
    },
};

module! {
    pub CoreModule {
        components = [
            UpsertUser, UpsertRepository, UpsertTeam,
            UpsertPullRequest, UpsertComment, RecordDeploy,
            HandlePullRequestEvent, HandleCommentEvent,
            RunFullSync, SynchronizeTeam,
            RegisterRepositoryHook, RegisterOrganizationHook
        ],
        providers = []
    }
}
