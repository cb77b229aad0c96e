use uuid::Uuid;

/// Current projection of an installation's events.
///
/// A nil `id` means the installation has not been created yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstallationState {
    pub id: Uuid,
    pub installation_id: String,
    pub status: Option<String>,
    pub remark: Option<String>,
    pub location_remark: Option<String>,
    pub unit_address_id: Option<Uuid>,
}

impl InstallationState {
    pub fn is_initialized(&self) -> bool {
        !self.id.is_nil()
    }
}
