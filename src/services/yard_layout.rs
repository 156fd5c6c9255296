//! Agregación de motos por zona
//!
//! Dos estrategias de agrupación:
//! - por estado derivado (mapa del pátio)
//! - por etiqueta física de zona (lista de zonas)
//!
//! La capacidad por zona es sólo una señal: una zona llena se reporta en
//! `overflow` pero sigue recibiendo todas sus motos.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

use crate::models::motorcycle::Motorcycle;
use crate::models::status::MotorcycleStatus;
use crate::services::status_classifier::{classify, filter_by_status, HasStatusFlags};

/// Motos particionadas por estado, en el orden de entrada
#[derive(Debug, Serialize)]
pub struct StatusBuckets<'a, T> {
    pub ready: Vec<&'a T>,
    pub mechanical_issue: Vec<&'a T>,
    pub flagged: Vec<&'a T>,
}

impl<'a, T> StatusBuckets<'a, T> {
    fn empty() -> Self {
        Self {
            ready: Vec::new(),
            mechanical_issue: Vec::new(),
            flagged: Vec::new(),
        }
    }

    pub fn get(&self, status: MotorcycleStatus) -> &[&'a T] {
        match status {
            MotorcycleStatus::Ready => &self.ready,
            MotorcycleStatus::MechanicalIssue => &self.mechanical_issue,
            MotorcycleStatus::Flagged => &self.flagged,
        }
    }

    fn get_mut(&mut self, status: MotorcycleStatus) -> &mut Vec<&'a T> {
        match status {
            MotorcycleStatus::Ready => &mut self.ready,
            MotorcycleStatus::MechanicalIssue => &mut self.mechanical_issue,
            MotorcycleStatus::Flagged => &mut self.flagged,
        }
    }

    pub fn len(&self) -> usize {
        self.ready.len() + self.mechanical_issue.len() + self.flagged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cantidad por estado, en el orden de `MotorcycleStatus::ALL`
    pub fn counts(&self) -> [(MotorcycleStatus, usize); 3] {
        MotorcycleStatus::ALL.map(|status| (status, self.get(status).len()))
    }
}

pub fn group_by_status<T: HasStatusFlags>(items: &[T]) -> StatusBuckets<'_, T> {
    let mut buckets = StatusBuckets::empty();
    for item in items {
        buckets.get_mut(classify(item)).push(item);
    }
    buckets
}

/// Agrupar por la etiqueta física `zone` de cada moto
pub fn group_by_zone_label<'a, I>(motorcycles: I) -> BTreeMap<String, Vec<&'a Motorcycle>>
where
    I: IntoIterator<Item = &'a Motorcycle>,
{
    let mut groups: BTreeMap<String, Vec<&'a Motorcycle>> = BTreeMap::new();
    for moto in motorcycles {
        groups.entry(moto.zone.clone()).or_default().push(moto);
    }
    groups
}

/// Clave de una zona: un estado o una etiqueta física
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ZoneKey {
    Status(MotorcycleStatus),
    Label(String),
}

impl fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneKey::Status(status) => f.pad(status.as_str()),
            ZoneKey::Label(label) => f.pad(label),
        }
    }
}

/// Zona declarada del pátio
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneSpec {
    pub key: ZoneKey,
    pub area: String,
}

impl ZoneSpec {
    pub fn for_status(status: MotorcycleStatus, area: impl Into<String>) -> Self {
        Self {
            key: ZoneKey::Status(status),
            area: area.into(),
        }
    }

    pub fn for_label(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            key: ZoneKey::Label(label.clone()),
            area: label,
        }
    }
}

/// Resultado de `layout_zones`
#[derive(Debug)]
pub struct ZoneLayout<'a> {
    pub assignments: BTreeMap<ZoneKey, Vec<&'a Motorcycle>>,
    pub overflow: Vec<ZoneKey>,
    pub unassigned: Vec<&'a Motorcycle>,
}

impl<'a> ZoneLayout<'a> {
    pub fn get(&self, key: &ZoneKey) -> &[&'a Motorcycle] {
        self.assignments.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_overflowing(&self, key: &ZoneKey) -> bool {
        self.overflow.contains(key)
    }
}

/// Asignar motos a las zonas declaradas.
///
/// Una moto va a la zona cuyo estado coincide con el suyo; si no hay zona
/// para su estado, a la zona con su etiqueta física; si tampoco existe,
/// queda en `unassigned`. Una zona con `capacity_per_zone` motos o más se
/// reporta en `overflow` sin recortar su lista.
pub fn layout_zones<'a>(
    motorcycles: &'a [Motorcycle],
    zones: &[ZoneSpec],
    capacity_per_zone: usize,
) -> ZoneLayout<'a> {
    let mut assignments: BTreeMap<ZoneKey, Vec<&'a Motorcycle>> = zones
        .iter()
        .map(|zone| (zone.key.clone(), Vec::new()))
        .collect();
    let mut unassigned = Vec::new();

    for moto in motorcycles {
        let by_status = ZoneKey::Status(classify(moto));
        let by_label = ZoneKey::Label(moto.zone.clone());

        if let Some(bucket) = assignments.get_mut(&by_status) {
            bucket.push(moto);
        } else if let Some(bucket) = assignments.get_mut(&by_label) {
            bucket.push(moto);
        } else {
            debug!("🅿️ Moto {} sin zona declarada ({})", moto.plate, by_status);
            unassigned.push(moto);
        }
    }

    let mut overflow: Vec<ZoneKey> = Vec::new();
    for zone in zones {
        let count = assignments.get(&zone.key).map_or(0, Vec::len);
        if count >= capacity_per_zone && !overflow.contains(&zone.key) {
            warn!(
                "⚠️ Zona {} ({}) en capacidad: {} motos, límite {}",
                zone.area, zone.key, count, capacity_per_zone
            );
            overflow.push(zone.key.clone());
        }
    }

    ZoneLayout {
        assignments,
        overflow,
        unassigned,
    }
}

/// Configuración del mapa del pátio
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YardConfig {
    pub zones: Vec<ZoneSpec>,
    pub slots_per_zone: usize,
}

impl YardConfig {
    pub fn with_slots(slots_per_zone: usize) -> Self {
        Self {
            slots_per_zone,
            ..Self::default()
        }
    }
}

impl Default for YardConfig {
    /// Pátio de la filial: A-B listas, C-D con B.O., E-F en mecánica
    fn default() -> Self {
        Self {
            zones: vec![
                ZoneSpec::for_status(MotorcycleStatus::Ready, "A"),
                ZoneSpec::for_status(MotorcycleStatus::Ready, "B"),
                ZoneSpec::for_status(MotorcycleStatus::Flagged, "C"),
                ZoneSpec::for_status(MotorcycleStatus::Flagged, "D"),
                ZoneSpec::for_status(MotorcycleStatus::MechanicalIssue, "E"),
                ZoneSpec::for_status(MotorcycleStatus::MechanicalIssue, "F"),
            ],
            slots_per_zone: 5,
        }
    }
}

/// Una zona del mapa con sus casilleros
#[derive(Debug, Serialize)]
pub struct ZoneGrid<'a> {
    pub zone: ZoneSpec,
    pub slots: Vec<Option<&'a Motorcycle>>,
}

impl<'a> ZoneGrid<'a> {
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Esta área física tiene `capacity` motos o más
    pub fn at_capacity(&self, capacity: usize) -> bool {
        self.occupied() >= capacity
    }
}

#[derive(Debug, Serialize)]
pub struct YardGrid<'a> {
    pub zones: Vec<ZoneGrid<'a>>,
    /// Motos que no entran en ningún casillero
    pub hidden: usize,
}

/// Construir el mapa del pátio.
///
/// Cada estado se reparte entre las zonas que lo comparten, en orden de
/// declaración, `slots_per_zone` motos por zona. Las zonas con clave de
/// etiqueta reciben las motos con esa `zone`.
pub fn build_yard_grid<'a>(
    motorcycles: &'a [Motorcycle],
    config: &YardConfig,
    filter: Option<MotorcycleStatus>,
) -> YardGrid<'a> {
    let visible: Vec<&'a Motorcycle> = filter_by_status(motorcycles, filter);
    let buckets = group_by_status(&visible);
    let labels = group_by_zone_label(visible.iter().copied());

    let slots = config.slots_per_zone;
    let mut offsets: BTreeMap<&ZoneKey, usize> = BTreeMap::new();
    let mut placed = 0usize;

    let zones = config
        .zones
        .iter()
        .map(|zone| {
            let source: Vec<&'a Motorcycle> = match &zone.key {
                ZoneKey::Status(status) => buckets.get(*status).iter().map(|m| **m).collect(),
                ZoneKey::Label(label) => labels.get(label).cloned().unwrap_or_default(),
            };

            let offset = offsets.entry(&zone.key).or_insert(0);
            let start = (*offset).min(source.len());
            let end = (start + slots).min(source.len());
            *offset += slots;

            let mut grid_slots: Vec<Option<&'a Motorcycle>> =
                source[start..end].iter().copied().map(Some).collect();
            placed += grid_slots.len();
            grid_slots.resize(slots, None);

            ZoneGrid {
                zone: zone.clone(),
                slots: grid_slots,
            }
        })
        .collect();

    let hidden = visible.len().saturating_sub(placed);
    if hidden > 0 {
        warn!("⚠️ {} motos no caben en el mapa del pátio", hidden);
    }

    YardGrid { zones, hidden }
}
