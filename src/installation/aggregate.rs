use uuid::Uuid;

use crate::installation::{InstallationCommand, InstallationError, InstallationEvent, InstallationState};
use crate::Aggregate;

/// The installation aggregate. Its events are stored in the stream named by the installation `id`.
pub struct Installation;

impl Aggregate for Installation {
    const NAME: &'static str = "installation";
    type State = InstallationState;
    type Command = InstallationCommand;
    type Event = InstallationEvent;
    type Error = InstallationError;

    fn handle_command(state: &Self::State, command: Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let event = match command {
            InstallationCommand::Create {
                id,
                installation_id,
                status,
                remark,
                location_remark,
                unit_address_id,
            } => {
                if state.is_initialized() {
                    return Err(InstallationError::AlreadyCreated { id: state.id });
                }

                if id.is_nil() {
                    return Err(InstallationError::IdInvalid { id });
                }

                if installation_id.trim().is_empty() {
                    return Err(InstallationError::InstallationIdInvalid { installation_id });
                }

                if let Some(unit_address_id) = unit_address_id.filter(Uuid::is_nil) {
                    return Err(InstallationError::UnitAddressIdInvalid { unit_address_id });
                }

                InstallationEvent::Created {
                    id,
                    installation_id,
                    status,
                    remark,
                    location_remark,
                    unit_address_id,
                }
            }
            InstallationCommand::ChangeStatus { status } => {
                let id = initialized_id(state)?;
                ensure_changed("status", &state.status, &status)?;
                InstallationEvent::StatusChanged { id, status }
            }
            InstallationCommand::ChangeRemark { remark } => {
                let id = initialized_id(state)?;
                ensure_changed("remark", &state.remark, &remark)?;
                InstallationEvent::RemarkChanged { id, remark }
            }
            InstallationCommand::ChangeLocationRemark { location_remark } => {
                let id = initialized_id(state)?;
                ensure_changed("location_remark", &state.location_remark, &location_remark)?;
                InstallationEvent::LocationRemarkChanged { id, location_remark }
            }
            // Setting the current unit address again is accepted.
            InstallationCommand::ChangeUnitAddressId { unit_address_id } => {
                let id = initialized_id(state)?;

                if unit_address_id.is_nil() {
                    return Err(InstallationError::UnitAddressIdInvalid { unit_address_id });
                }

                InstallationEvent::UnitAddressChanged { id, unit_address_id }
            }
        };

        Ok(vec![event])
    }

    fn check_events(aggregate_id: &Uuid, events: &[Self::Event]) -> Result<(), Self::Error> {
        match events.iter().find(|event| event.id() != aggregate_id) {
            Some(event) => Err(InstallationError::IdMismatch {
                id: *event.id(),
                aggregate_id: *aggregate_id,
            }),
            None => Ok(()),
        }
    }

    fn apply_event(state: Self::State, payload: Self::Event) -> Self::State {
        match payload {
            InstallationEvent::Created {
                id,
                installation_id,
                status,
                remark,
                location_remark,
                unit_address_id,
            } => InstallationState {
                id,
                installation_id,
                status,
                remark,
                location_remark,
                unit_address_id,
            },
            InstallationEvent::StatusChanged { status, .. } => InstallationState { status, ..state },
            InstallationEvent::RemarkChanged { remark, .. } => InstallationState { remark, ..state },
            InstallationEvent::LocationRemarkChanged { location_remark, .. } => {
                InstallationState { location_remark, ..state }
            }
            InstallationEvent::UnitAddressChanged { unit_address_id, .. } => InstallationState {
                unit_address_id: Some(unit_address_id),
                ..state
            },
        }
    }
}

fn initialized_id(state: &InstallationState) -> Result<Uuid, InstallationError> {
    if state.is_initialized() {
        Ok(state.id)
    } else {
        Err(InstallationError::NotInitialized)
    }
}

fn ensure_changed(field: &'static str, current: &Option<String>, new: &Option<String>) -> Result<(), InstallationError> {
    if current == new {
        Err(InstallationError::NoChanges { field })
    } else {
        Ok(())
    }
}
