//! Subscription builder
//!
//! Turns topology facts (report style, cells) into a [`SubscriptionSpec`]:
//! one encoded event trigger and an ordered list of actions.

use bytes::Bytes;
use nextgsim_e2sm::{kpm, rc};

use crate::api::{Action, ActionType, SubscriptionSpec, SubsequentAction};
use crate::error::BuildError;
use crate::service_model::ServiceModel;
use crate::topology::{E2Cell, KpmReportStyle};

/// ID of the RC SINR report action.
pub const RC_SINR_ACTION_ID: i32 = 3;

/// Builds the subscription spec for `target` with the given service model.
///
/// The event trigger is built first, then the actions. The first failure
/// aborts the build.
pub fn build_spec<M: ServiceModel + ?Sized>(
    model: &M,
    target: &M::Target,
) -> Result<SubscriptionSpec, BuildError> {
    let event_trigger = model.build_event_trigger().map_err(BuildError::EventTrigger)?;
    let actions = model.build_actions(target)?;
    Ok(SubscriptionSpec {
        service_model: model.descriptor(),
        event_trigger: Bytes::from(event_trigger),
        actions,
    })
}

/// Returns the cells ordered by cell object identifier.
///
/// The sort is stable, so cells sharing an identifier keep their input order.
pub fn sort_cells(cells: &[E2Cell]) -> Vec<&E2Cell> {
    let mut ordered: Vec<&E2Cell> = cells.iter().collect();
    ordered.sort_by(|a, b| a.cell_object_id.cmp(&b.cell_object_id));
    ordered
}

/// Builds one KPM report action per cell.
///
/// Cells are visited in [`sort_cells`] order. The cell at position `i` gets
/// action ID `i` and subscription sequence number `i + 1`. An empty cell
/// list yields no actions.
pub fn build_kpm_actions(style: &KpmReportStyle, cells: &[E2Cell]) -> Result<Vec<Action>, BuildError> {
    let measurements: Vec<&str> = style.measurements.iter().map(|m| m.name.as_str()).collect();

    sort_cells(cells)
        .into_iter()
        .enumerate()
        .map(|(i, cell)| -> Result<Action, BuildError> {
            let action_id = i as i32;
            let payload = kpm::encode_action_definition(
                i as i64 + 1,
                &cell.cell_object_id,
                style.style_type,
                &measurements,
            )
            .map_err(|source| BuildError::CellAction {
                action_id,
                cell: cell.cell_object_id.clone(),
                source,
            })?;

            Ok(Action {
                id: action_id,
                action_type: ActionType::Report,
                subsequent_action: Some(SubsequentAction::CONTINUE_IMMEDIATELY),
                payload: Bytes::from(payload),
            })
        })
        .collect()
}

/// Builds the single RC action reporting the serving cell SINR.
pub fn build_rc_actions() -> Result<Vec<Action>, BuildError> {
    let payload = rc::encode_action_definition(rc::E2_NODE_INFORMATION_STYLE, &[rc::PARAMETER_SINR])
        .map_err(|source| BuildError::Action {
            action_id: RC_SINR_ACTION_ID,
            source,
        })?;

    Ok(vec![Action {
        id: RC_SINR_ACTION_ID,
        action_type: ActionType::Report,
        subsequent_action: None,
        payload: Bytes::from(payload),
    }])
}
