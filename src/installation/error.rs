use std::fmt::{Display, Formatter};

use thiserror::Error;
use uuid::Uuid;

/// Stable, machine readable code of an [`InstallationError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstallationErrorCode {
    AlreadyCreated,
    IdInvalid,
    InstallationIdInvalid,
    UnitAddressIdInvalid,
    NotInitialized,
    NoChanges,
    IdMismatch,
}

impl InstallationErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyCreated => "ALREADY_CREATED",
            Self::IdInvalid => "ID_INVALID",
            Self::InstallationIdInvalid => "INSTALLATION_ID_INVALID",
            Self::UnitAddressIdInvalid => "UNIT_ADDRESS_ID_INVALID",
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::NoChanges => "NO_CHANGES",
            Self::IdMismatch => "ID_MISMATCH",
        }
    }
}

impl Display for InstallationErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons an installation refuses a command. A refused command emits no event and leaves the
/// state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InstallationError {
    #[error("ALREADY_CREATED: Cannot create, it has already been created: Id: '{id}'")]
    AlreadyCreated { id: Uuid },

    #[error("ID_INVALID: Id is invalid: '{id}'")]
    IdInvalid { id: Uuid },

    #[error("INSTALLATION_ID_INVALID: Installation id cannot be empty or whitespace: '{installation_id}'")]
    InstallationIdInvalid { installation_id: String },

    #[error("UNIT_ADDRESS_ID_INVALID: Unit address id is invalid: '{unit_address_id}'")]
    UnitAddressIdInvalid { unit_address_id: Uuid },

    #[error("NOT_INITIALIZED: The installation has not been created")]
    NotInitialized,

    #[error("NO_CHANGES: {field} is already set to the given value")]
    NoChanges { field: &'static str },

    #[error("ID_MISMATCH: Id '{id}' cannot be stored in the stream of aggregate '{aggregate_id}'")]
    IdMismatch { id: Uuid, aggregate_id: Uuid },
}

impl InstallationError {
    pub const fn code(&self) -> InstallationErrorCode {
        match self {
            Self::AlreadyCreated { .. } => InstallationErrorCode::AlreadyCreated,
            Self::IdInvalid { .. } => InstallationErrorCode::IdInvalid,
            Self::InstallationIdInvalid { .. } => InstallationErrorCode::InstallationIdInvalid,
            Self::UnitAddressIdInvalid { .. } => InstallationErrorCode::UnitAddressIdInvalid,
            Self::NotInitialized => InstallationErrorCode::NotInitialized,
            Self::NoChanges { .. } => InstallationErrorCode::NoChanges,
            Self::IdMismatch { .. } => InstallationErrorCode::IdMismatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_starts_with_code() {
        let errors = vec![
            InstallationError::AlreadyCreated { id: Uuid::new_v4() },
            InstallationError::IdInvalid { id: Uuid::nil() },
            InstallationError::InstallationIdInvalid {
                installation_id: " ".to_string(),
            },
            InstallationError::UnitAddressIdInvalid {
                unit_address_id: Uuid::nil(),
            },
            InstallationError::NotInitialized,
            InstallationError::NoChanges { field: "status" },
            InstallationError::IdMismatch {
                id: Uuid::new_v4(),
                aggregate_id: Uuid::new_v4(),
            },
        ];

        for error in errors {
            let prefix = format!("{}: ", error.code());
            assert!(error.to_string().starts_with(&prefix), "{}", error);
        }
    }

    #[test]
    fn code_displays_as_screaming_snake_case() {
        assert_eq!(InstallationErrorCode::UnitAddressIdInvalid.to_string(), "UNIT_ADDRESS_ID_INVALID");
        assert_eq!(InstallationErrorCode::NoChanges.to_string(), "NO_CHANGES");
    }
}
