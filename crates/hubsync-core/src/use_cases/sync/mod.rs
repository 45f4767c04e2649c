pub(crate) mod run_full_sync;
pub(crate) mod synchronize_team;

pub use run_full_sync::RunFullSyncInterface;
pub use synchronize_team::SynchronizeTeamInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    run_full_sync::MockRunFullSyncInterface, synchronize_team::MockSynchronizeTeamInterface,
};
