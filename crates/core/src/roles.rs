//! Account roles and the access-flag derivation applied on every user write.
//!
//! A user's `is_staff` flag is never stored as caller input. It is derived,
//! together with the final `role` and `is_superuser`, by
//! [`AccessFlags::normalize`]:
//!
//! 1. superuser => role `ADMIN`, staff
//! 2. `ADMIN` (not superuser) => staff, not superuser
//! 3. `CUSTOMER` => neither staff nor superuser

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Stored name of [`Role::Admin`]. Must match the `users.role` CHECK constraint.
pub const ROLE_ADMIN: &str = "ADMIN";
/// Stored name of [`Role::Customer`].
pub const ROLE_CUSTOMER: &str = "CUSTOMER";

/// Coarse-grained permission category of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[default]
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Customer => ROLE_CUSTOMER,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_CUSTOMER => Ok(Role::Customer),
            other => Err(CoreError::Validation(format!(
                "Unknown role '{other}'. Valid roles: {ROLE_ADMIN}, {ROLE_CUSTOMER}"
            ))),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The role plus the two flags the role policy keeps consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessFlags {
    pub role: Role,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl AccessFlags {
    /// Flags of a self-registered account.
    pub fn customer() -> Self {
        Self {
            role: Role::Customer,
            is_staff: false,
            is_superuser: false,
        }
    }

    /// Flags of an account created through a privileged path.
    pub fn superuser() -> Self {
        Self {
            role: Role::Admin,
            is_staff: true,
            is_superuser: true,
        }
    }

    /// Build normalized flags from a declared role (absent means `CUSTOMER`)
    /// and superuser flag.
    pub fn from_declared(role: Option<Role>, is_superuser: bool) -> Self {
        Self {
            role: role.unwrap_or_default(),
            is_staff: false,
            is_superuser,
        }
        .normalized()
    }

    /// Force `role`, `is_staff` and `is_superuser` into a consistent state.
    ///
    /// Total and idempotent. Superuser status always wins over the declared
    /// role; `is_staff` is never taken from the input.
    pub fn normalize(&mut self) {
        if self.is_superuser {
            self.role = Role::Admin;
            self.is_staff = true;
        } else if self.role == Role::Admin {
            self.is_staff = true;
            self.is_superuser = false;
        } else {
            self.is_staff = false;
            self.is_superuser = false;
        }
    }

    /// By-value form of [`normalize`](Self::normalize).
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Whether the flags already satisfy the role policy.
    pub fn is_consistent(&self) -> bool {
        *self == self.normalized()
    }
}

/// Validate the flags of a superuser-creation request and return the
/// superuser access flags.
///
/// Omitted flags default to `true`. An explicit `false` for either flag is
/// rejected with [`CoreError::InvalidSuperuserRequest`] instead of being
/// overridden.
pub fn superuser_flags(
    is_staff: Option<bool>,
    is_superuser: Option<bool>,
) -> Result<AccessFlags, CoreError> {
    if is_staff == Some(false) {
        return Err(CoreError::InvalidSuperuserRequest(
            "Superuser must have is_staff=true".to_string(),
        ));
    }
    if is_superuser == Some(false) {
        return Err(CoreError::InvalidSuperuserRequest(
            "Superuser must have is_superuser=true".to_string(),
        ));
    }
    Ok(AccessFlags::superuser().normalized())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    /// Every combination a caller could submit, including an unset role.
    fn all_candidates() -> Vec<(Option<Role>, bool, bool)> {
        let mut out = Vec::new();
        for role in [None, Some(Role::Admin), Some(Role::Customer)] {
            for is_staff in [false, true] {
                for is_superuser in [false, true] {
                    out.push((role, is_staff, is_superuser));
                }
            }
        }
        out
    }

    fn holds_policy(flags: &AccessFlags) -> bool {
        let superuser_ok = !flags.is_superuser || (flags.role == Role::Admin && flags.is_staff);
        let admin_ok = flags.role != Role::Admin || flags.is_superuser || flags.is_staff;
        let customer_ok =
            flags.role != Role::Customer || (!flags.is_staff && !flags.is_superuser);
        superuser_ok && admin_ok && customer_ok
    }

    #[test]
    fn normalization_always_satisfies_policy() {
        for (role, is_staff, is_superuser) in all_candidates() {
            let flags = AccessFlags {
                role: role.unwrap_or_default(),
                is_staff,
                is_superuser,
            }
            .normalized();
            assert!(
                holds_policy(&flags),
                "policy violated for {role:?}/{is_staff}/{is_superuser}: {flags:?}"
            );
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        for (role, is_staff, is_superuser) in all_candidates() {
            let once = AccessFlags {
                role: role.unwrap_or_default(),
                is_staff,
                is_superuser,
            }
            .normalized();
            assert_eq!(once.normalized(), once);
        }
    }

    #[test]
    fn superuser_customer_becomes_admin() {
        let flags = AccessFlags::from_declared(Some(Role::Customer), true);
        assert_eq!(flags, AccessFlags::superuser());
    }

    #[test]
    fn admin_gets_staff_but_not_superuser() {
        let flags = AccessFlags::from_declared(Some(Role::Admin), false);
        assert_eq!(flags.role, Role::Admin);
        assert!(flags.is_staff);
        assert!(!flags.is_superuser);
    }

    #[test]
    fn customer_or_unset_role_has_no_flags() {
        for role in [None, Some(Role::Customer)] {
            let flags = AccessFlags::from_declared(role, false);
            assert_eq!(flags, AccessFlags::customer());
        }
    }

    #[test]
    fn customer_cannot_keep_a_staff_flag() {
        let mut flags = AccessFlags {
            role: Role::Customer,
            is_staff: true,
            is_superuser: false,
        };
        assert!(!flags.is_consistent());
        flags.normalize();
        assert!(!flags.is_staff);
    }

    #[test]
    fn consistent_flags_are_left_unchanged() {
        let consistent = [
            AccessFlags::customer(),
            AccessFlags::superuser(),
            AccessFlags {
                role: Role::Admin,
                is_staff: true,
                is_superuser: false,
            },
        ];
        for flags in consistent {
            assert!(flags.is_consistent());
            assert_eq!(flags.normalized(), flags);
        }
    }

    #[test]
    fn superuser_request_defaults_to_all_flags() {
        let flags = superuser_flags(None, None).expect("defaults are valid");
        assert_eq!(flags, AccessFlags::superuser());

        let flags = superuser_flags(Some(true), Some(true)).expect("explicit true is valid");
        assert_eq!(flags, AccessFlags::superuser());
    }

    #[test]
    fn superuser_request_rejects_explicit_false() {
        assert_matches!(
            superuser_flags(Some(false), None),
            Err(CoreError::InvalidSuperuserRequest(msg)) if msg.contains("is_staff")
        );
        assert_matches!(
            superuser_flags(Some(true), Some(false)),
            Err(CoreError::InvalidSuperuserRequest(msg)) if msg.contains("is_superuser")
        );
    }

    #[test]
    fn role_parses_stored_names_only() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::try_from("CUSTOMER".to_string()).unwrap(), Role::Customer);
        assert_matches!("admin".parse::<Role>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        let role: Role = serde_json::from_str("\"CUSTOMER\"").unwrap();
        assert_eq!(role, Role::Customer);
        assert_eq!(Role::default(), Role::Customer);
    }
}
