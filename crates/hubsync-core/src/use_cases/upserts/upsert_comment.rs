use async_trait::async_trait;
use hubsync_ghapi_interface::types::{GhIssue, GhIssueComment, GhRepository};
use hubsync_models::Comment;
use shaku::{Component, HasComponent, Interface};
use tracing::{info, warn};

use super::UpsertUserInterface;
use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait UpsertCommentInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        gh_repository: &GhRepository,
        gh_issue: &GhIssue,
        gh_comment: &GhIssueComment,
    ) -> Result<Option<Comment>>;
}

#[derive(Component)]
#[shaku(interface = UpsertCommentInterface)]
pub(crate) struct UpsertComment;

#[async_trait]
impl UpsertCommentInterface for UpsertComment {
    #[tracing::instrument(skip_all, fields(
        comment_id = gh_comment.id,
        pr_number = gh_issue.number,
        repository_path = %gh_repository.full_name
    ))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        gh_repository: &GhRepository,
        gh_issue: &GhIssue,
        gh_comment: &GhIssueComment,
    ) -> Result<Option<Comment>> {
        if gh_comment.id == 0 {
            warn!(message = "Rejecting comment payload, keeping prior state");
            return Ok(ctx.db_service.comments_get(gh_comment.id).await?);
        }

        // Comments can only be linked to an already mirrored pull request.
        let pull_request = match ctx
            .db_service
            .repositories_get(gh_repository.id)
            .await?
        {
            Some(repository) => {
                ctx.db_service
                    .pull_requests_get_by_number(repository.id, gh_issue.number)
                    .await?
            }
            None => None,
        };

        let pull_request = match pull_request {
            Some(pull_request) => pull_request,
            None => {
                info!(
                    pr_number = gh_issue.number,
                    message = "Comment on an unmirrored pull request, skipping"
                );
                return Ok(ctx.db_service.comments_get(gh_comment.id).await?);
            }
        };

        let upsert_user: &dyn UpsertUserInterface = ctx.core_module.resolve_ref();
        let author = match upsert_user.run(ctx, &gh_comment.user).await? {
            Some(author) => author,
            None => {
                warn!(message = "Comment payload carries no usable author, skipping");
                return Ok(ctx.db_service.comments_get(gh_comment.id).await?);
            }
        };

        match ctx.db_service.comments_get(gh_comment.id).await? {
            Some(existing) if existing.updated_at > gh_comment.updated_at => {
                info!(
                    comment_id = existing.id,
                    message = "Ignoring out-of-date comment payload"
                );
                Ok(Some(existing))
            }
            Some(existing) => Ok(Some(
                ctx.db_service
                    .comments_update(Comment {
                        pull_request_id: pull_request.id,
                        author_id: author.id,
                        body: gh_comment.body.clone(),
                        updated_at: gh_comment.updated_at,
                        ..existing
                    })
                    .await?,
            )),
            None => Ok(Some(
                ctx.db_service
                    .comments_create(Comment {
                        id: gh_comment.id,
                        pull_request_id: pull_request.id,
                        author_id: author.id,
                        body: gh_comment.body.clone(),
                        created_at: gh_comment.created_at,
                        updated_at: gh_comment.updated_at,
                    })
                    .await?,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use hubsync_database_interface::DbService;
    use hubsync_ghapi_interface::types::GhUser;
    use hubsync_models::{PullRequest, Repository};
    use pretty_assertions::assert_eq;
    use time::OffsetDateTime;

    use super::*;
    use crate::context::tests::CoreContextTest;

    fn gh_repository() -> GhRepository {
        GhRepository {
            id: 10,
            name: "mirror".into(),
            full_name: "me/mirror".into(),
            owner: GhUser {
                id: 1,
                login: "me".into(),
            },
        }
    }

    fn gh_comment() -> GhIssueComment {
        GhIssueComment {
            id: 500,
            user: GhUser {
                id: 2,
                login: "alice".into(),
            },
            body: "Looks good".into(),
            created_at: OffsetDateTime::from_unix_timestamp(1_000).unwrap(),
            updated_at: OffsetDateTime::from_unix_timestamp(1_000).unwrap(),
        }
    }

    async fn seed_pull_request(ctx: &CoreContextTest) {
        let repo = ctx
            .db_service
            .repositories_create(Repository {
                id: 10,
                owner: "me".into(),
                name: "mirror".into(),
            })
            .await
            .unwrap();
        ctx.db_service
            .pull_requests_create(
                PullRequest {
                    id: 100,
                    number: 1,
                    ..Default::default()
                }
                .with_repository(&repo),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn comment_is_linked_to_its_pull_request() {
        let ctx = CoreContextTest::new();
        seed_pull_request(&ctx).await;

        let comment = UpsertComment
            .run(
                &ctx.as_context(),
                &gh_repository(),
                &GhIssue { id: 99, number: 1 },
                &gh_comment(),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(comment.pull_request_id, 100);
        assert_eq!(comment.author_id, 2);
    }

    #[tokio::test]
    async fn comment_on_unmirrored_pull_request_is_skipped() {
        let ctx = CoreContextTest::new();

        let result = UpsertComment
            .run(
                &ctx.as_context(),
                &gh_repository(),
                &GhIssue { id: 99, number: 1 },
                &gh_comment(),
            )
            .await
            .unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn edited_body_is_merged() {
        let ctx = CoreContextTest::new();
        seed_pull_request(&ctx).await;

        UpsertComment
            .run(
                &ctx.as_context(),
                &gh_repository(),
                &GhIssue { id: 99, number: 1 },
                &gh_comment(),
            )
            .await
            .unwrap();

        let edited = UpsertComment
            .run(
                &ctx.as_context(),
                &gh_repository(),
                &GhIssue { id: 99, number: 1 },
                &GhIssueComment {
                    body: "Changed my mind".into(),
                    updated_at: OffsetDateTime::from_unix_timestamp(2_000).unwrap(),
                    ..gh_comment()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(edited.body, "Changed my mind");
        assert_eq!(
            ctx.db_service
                .comments_list_for_pull_request(100)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn out_of_date_payload_is_ignored() {
        let ctx = CoreContextTest::new();
        seed_pull_request(&ctx).await;

        let fresh = UpsertComment
            .run(
                &ctx.as_context(),
                &gh_repository(),
                &GhIssue { id: 99, number: 1 },
                &GhIssueComment {
                    updated_at: OffsetDateTime::from_unix_timestamp(5_000).unwrap(),
                    ..gh_comment()
                },
            )
            .await
            .unwrap()
            .unwrap();

        let after_stale_retry = UpsertComment
            .run(
                &ctx.as_context(),
                &gh_repository(),
                &GhIssue { id: 99, number: 1 },
                &GhIssueComment {
                    body: "Stale body".into(),
                    updated_at: OffsetDateTime::from_unix_timestamp(1_000).unwrap(),
                    ..gh_comment()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(after_stale_retry, fresh);
    }
}
