use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::handler::EventHandler;
use crate::installation::{Installation, InstallationEvent};
use crate::store::StoreEvent;

/// Read side row of an installation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallationSummary {
    pub id: Uuid,
    pub installation_id: String,
    pub status: Option<String>,
    pub unit_address_id: Option<Uuid>,
}

/// In-memory projection answering lookups by the aggregate id or by the business key of an
/// installation.
///
/// Register it on the store through an `Arc` to keep a handle for querying.
#[derive(Debug, Default)]
pub struct InstallationView {
    rows: RwLock<Rows>,
}

#[derive(Debug, Default)]
struct Rows {
    by_id: HashMap<Uuid, InstallationSummary>,
    by_installation_id: HashMap<String, Uuid>,
}

impl InstallationView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn by_id(&self, id: Uuid) -> Option<InstallationSummary> {
        self.rows.read().await.by_id.get(&id).cloned()
    }

    pub async fn by_installation_id(&self, installation_id: &str) -> Option<InstallationSummary> {
        let rows = self.rows.read().await;

        rows.by_installation_id
            .get(installation_id)
            .and_then(|id| rows.by_id.get(id))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.by_id.is_empty()
    }
}

#[async_trait]
impl EventHandler<Installation> for InstallationView {
    async fn handle(&self, event: &StoreEvent<InstallationEvent>) {
        let mut rows = self.rows.write().await;
        let id: Uuid = event.aggregate_id;

        match event.payload() {
            InstallationEvent::Created {
                installation_id,
                status,
                unit_address_id,
                ..
            } => {
                let _ = rows.by_installation_id.insert(installation_id.clone(), id);
                let _ = rows.by_id.insert(
                    id,
                    InstallationSummary {
                        id,
                        installation_id: installation_id.clone(),
                        status: status.clone(),
                        unit_address_id: *unit_address_id,
                    },
                );
            }
            InstallationEvent::StatusChanged { status, .. } => {
                if let Some(row) = rows.by_id.get_mut(&id) {
                    row.status = status.clone();
                }
            }
            InstallationEvent::UnitAddressChanged { unit_address_id, .. } => {
                if let Some(row) = rows.by_id.get_mut(&id) {
                    row.unit_address_id = Some(*unit_address_id);
                }
            }
            InstallationEvent::RemarkChanged { .. } | InstallationEvent::LocationRemarkChanged { .. } => {}
        }
    }

    fn name(&self) -> &'static str {
        "InstallationView"
    }
}
