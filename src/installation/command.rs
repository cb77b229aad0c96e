use uuid::Uuid;

/// Requested changes to an installation. Each accepted command emits exactly one
/// [`InstallationEvent`](crate::installation::InstallationEvent).
#[derive(Clone, Debug)]
pub enum InstallationCommand {
    /// Creates the installation. Allowed once, on an uninitialized installation.
    Create {
        id: Uuid,
        installation_id: String,
        status: Option<String>,
        remark: Option<String>,
        location_remark: Option<String>,
        unit_address_id: Option<Uuid>,
    },
    /// Sets a new lifecycle status.
    ChangeStatus {
        status: Option<String>,
    },
    /// Sets a new remark.
    ChangeRemark {
        remark: Option<String>,
    },
    /// Sets a new location remark.
    ChangeLocationRemark {
        location_remark: Option<String>,
    },
    /// Moves the installation to another unit address. The current one is accepted again.
    ChangeUnitAddressId {
        unit_address_id: Uuid,
    },
}
