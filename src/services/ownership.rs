//! Owner-equality check run before every mutation of an ownable resource.
//!
//! Order matters: existence first, then ownership. A missing resource is
//! always reported as not found, never as forbidden.
use thiserror::Error;
use uuid::Uuid;

use crate::services::auth::Principal;

/// A persisted entity whose `owner_id` decides who may mutate it.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OwnershipError {
    #[error("{resource} not found")]
    ResourceNotFound { resource: &'static str },
    #[error("forbidden")]
    Forbidden,
}

/// Pass the loaded resource through if `principal` owns it.
///
/// `resource` is the result of the lookup (`None` = missing); `name` is used
/// in the not-found message.
pub fn ensure_owner<T: Owned>(
    resource: Option<T>,
    name: &'static str,
    principal: &Principal,
) -> Result<T, OwnershipError> {
    let resource = resource.ok_or(OwnershipError::ResourceNotFound { resource: name })?;

    if resource.owner_id() != principal.id {
        return Err(OwnershipError::Forbidden);
    }

    Ok(resource)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doc {
        owner: Uuid,
    }

    impl Owned for Doc {
        fn owner_id(&self) -> Uuid {
            self.owner
        }
    }

    fn principal(id: Uuid) -> Principal {
        Principal {
            id,
            username: "someone".to_string(),
        }
    }

    #[test]
    fn owner_passes() {
        let owner = Uuid::new_v4();
        let doc = ensure_owner(Some(Doc { owner }), "doc", &principal(owner)).unwrap();
        assert_eq!(doc.owner, owner);
    }

    #[test]
    fn equal_ids_from_distinct_values_match() {
        let owner = Uuid::new_v4();
        let copy = Uuid::parse_str(&owner.to_string()).unwrap();

        assert!(ensure_owner(Some(Doc { owner }), "doc", &principal(copy)).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let err = ensure_owner(
            Some(Doc {
                owner: Uuid::new_v4(),
            }),
            "doc",
            &principal(Uuid::new_v4()),
        )
        .err();
        assert_eq!(err, Some(OwnershipError::Forbidden));
    }

    #[test]
    fn missing_resource_is_not_found_even_for_strangers() {
        let err = ensure_owner::<Doc>(None, "doc", &principal(Uuid::new_v4())).err();
        assert_eq!(
            err,
            Some(OwnershipError::ResourceNotFound { resource: "doc" })
        );
    }
}
