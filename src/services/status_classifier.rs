//! Clasificador de estado
//!
//! Precedencia fija: un B.O. (flagged) gana sobre la falla mecánica; sin
//! ninguna bandera la moto está lista.

use crate::models::status::{MotorcycleStatus, StatusFlags};

/// Cualquier valor que expone las dos banderas de estado
pub trait HasStatusFlags {
    fn mechanical_issue(&self) -> bool;
    fn flagged(&self) -> bool;
}

impl HasStatusFlags for StatusFlags {
    fn mechanical_issue(&self) -> bool {
        self.mechanical_issue
    }

    fn flagged(&self) -> bool {
        self.flagged
    }
}

impl<T: HasStatusFlags + ?Sized> HasStatusFlags for &T {
    fn mechanical_issue(&self) -> bool {
        (**self).mechanical_issue()
    }

    fn flagged(&self) -> bool {
        (**self).flagged()
    }
}

pub fn classify<T: HasStatusFlags + ?Sized>(item: &T) -> MotorcycleStatus {
    if item.flagged() {
        MotorcycleStatus::Flagged
    } else if item.mechanical_issue() {
        MotorcycleStatus::MechanicalIssue
    } else {
        MotorcycleStatus::Ready
    }
}

/// Filtro del pátio: `None` deja pasar todo
pub fn filter_by_status<T: HasStatusFlags>(
    items: &[T],
    status: Option<MotorcycleStatus>,
) -> Vec<&T> {
    items
        .iter()
        .filter(|item| status.map_or(true, |wanted| classify(*item) == wanted))
        .collect()
}
