use crate::error::Result;
use crate::models::{Design, DesignId, DesignRecord, UserId};

/// Which designs a query covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every public design, whoever owns it
    Public,
    /// Every design owned by the user, public or private
    OwnedBy(UserId),
    /// The user's private designs only
    PrivateOwnedBy(UserId),
    /// Public designs plus the user's private ones
    VisibleTo(UserId),
}

impl Scope {
    pub fn contains(&self, owner: UserId, is_public: bool) -> bool {
        match *self {
            Scope::Public => is_public,
            Scope::OwnedBy(user) => owner == user,
            Scope::PrivateOwnedBy(user) => owner == user && !is_public,
            Scope::VisibleTo(user) => is_public || owner == user,
        }
    }
}

/// Read access to stored designs
pub trait DesignReader {
    fn find_by_id(&self, id: DesignId) -> Result<Option<Design>>;

    /// Designs in scope, newest first
    fn find_by_scope(&self, scope: Scope) -> Result<Vec<Design>>;
}

/// Read-write access, bound to a single store transaction
pub trait DesignRepository: DesignReader {
    fn insert(&mut self, record: DesignRecord) -> Result<DesignId>;

    /// Returns false when no design had that id
    fn delete(&mut self, id: DesignId) -> Result<bool>;
}

/// Order by creation time descending; later ids win ties
pub fn sort_newest_first(designs: &mut [Design]) {
    designs.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn design(id: DesignId, created_at: i64) -> Design {
        Design {
            id,
            owner: 1,
            name: format!("design-{}", id),
            is_public: false,
            content: "{}".to_string(),
            created_at,
        }
    }

    #[test]
    fn test_scope_membership() {
        // (owner, is_public) as seen by user 1
        let own_public = (1, true);
        let own_private = (1, false);
        let other_public = (2, true);
        let other_private = (2, false);

        let expectations = [
            (Scope::Public, [true, false, true, false]),
            (Scope::OwnedBy(1), [true, true, false, false]),
            (Scope::PrivateOwnedBy(1), [false, true, false, false]),
            (Scope::VisibleTo(1), [true, true, true, false]),
        ];

        for (scope, expected) in expectations {
            let actual = [own_public, own_private, other_public, other_private]
                .map(|(owner, is_public)| scope.contains(owner, is_public));
            assert_eq!(actual, expected, "scope {:?}", scope);
        }
    }

    #[test]
    fn test_sort_newest_first_breaks_ties_by_id() {
        let mut designs = vec![design(1, 100), design(2, 300), design(3, 100), design(4, 200)];

        sort_newest_first(&mut designs);

        let ids: Vec<DesignId> = designs.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }
}
