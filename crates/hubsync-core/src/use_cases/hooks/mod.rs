pub(crate) mod register_organization_hook;
pub(crate) mod register_repository_hook;

pub use register_organization_hook::RegisterOrganizationHookInterface;
pub use register_repository_hook::RegisterRepositoryHookInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    register_organization_hook::MockRegisterOrganizationHookInterface,
    register_repository_hook::MockRegisterRepositoryHookInterface,
};
