//! Auxiliary point lists shared by the connectable shapes.

use crate::points::{PointArena, PointId};

pub(crate) fn connect(aux: &mut [PointId], point: PointId, target: PointId) -> bool {
    if aux.contains(&point) {
        return false;
    }
    match aux.iter_mut().find(|p| **p == target) {
        Some(slot) => {
            *slot = point;
            true
        }
        None => false,
    }
}

pub(crate) fn disconnect(aux: &mut [PointId], points: &mut PointArena, point: PointId) -> Option<PointId> {
    let slot = aux.iter_mut().find(|p| **p == point)?;
    *slot = points.duplicate(point);
    Some(*slot)
}

pub(crate) fn disconnect_all(aux: &mut [PointId], points: &mut PointArena) {
    for slot in aux.iter_mut() {
        *slot = points.duplicate(*slot);
    }
}

/// Remove `point` from the list, returning whether it was present.
pub(crate) fn remove(aux: &mut Vec<PointId>, point: PointId) -> bool {
    let before = aux.len();
    aux.retain(|p| *p != point);
    aux.len() != before
}
