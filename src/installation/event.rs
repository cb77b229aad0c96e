use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum InstallationEvent {
    Created {
        id: Uuid,
        installation_id: String,
        status: Option<String>,
        remark: Option<String>,
        location_remark: Option<String>,
        unit_address_id: Option<Uuid>,
    },
    StatusChanged {
        id: Uuid,
        status: Option<String>,
    },
    RemarkChanged {
        id: Uuid,
        remark: Option<String>,
    },
    LocationRemarkChanged {
        id: Uuid,
        location_remark: Option<String>,
    },
    UnitAddressChanged {
        id: Uuid,
        unit_address_id: Uuid,
    },
}

impl InstallationEvent {
    /// Id of the installation the event belongs to.
    pub const fn id(&self) -> &Uuid {
        match self {
            Self::Created { id, .. }
            | Self::StatusChanged { id, .. }
            | Self::RemarkChanged { id, .. }
            | Self::LocationRemarkChanged { id, .. }
            | Self::UnitAddressChanged { id, .. } => id,
        }
    }
}
