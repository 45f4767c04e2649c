pub(crate) mod handle_comment_event;
pub(crate) mod handle_pull_request_event;

pub use handle_comment_event::HandleCommentEventInterface;
pub use handle_pull_request_event::HandlePullRequestEventInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    handle_comment_event::MockHandleCommentEventInterface,
    handle_pull_request_event::MockHandlePullRequestEventInterface,
};
