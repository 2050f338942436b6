use edupath_auth::{ActorProfile, Permission, PermissionGrants, ScopedRole};

/// The actor a policy is evaluated for: resolved profile plus grant lookup.
#[derive(Clone, Copy)]
pub struct Subject<'a> {
    profile: &'a ActorProfile,
    grants: &'a dyn PermissionGrants,
}

impl<'a> Subject<'a> {
    pub fn new(profile: &'a ActorProfile, grants: &'a dyn PermissionGrants) -> Self {
        Self { profile, grants }
    }

    pub fn profile(&self) -> &'a ActorProfile {
        self.profile
    }

    pub fn scoped_role(&self) -> Option<ScopedRole<'a>> {
        self.profile.scoped_role()
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.grants.is_granted(self.profile.actor_id, permission)
    }
}

impl core::fmt::Debug for Subject<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subject")
            .field("profile", self.profile)
            .finish_non_exhaustive()
    }
}
