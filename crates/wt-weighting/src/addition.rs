//! Additive composition of a base cost function with soft modifiers.

use log::debug;

use wt_core::{Configuration, TravelCapability};
use wt_graph::RoadNetwork;

use crate::namespace::{modifier_names, modifier_params};
use crate::{params, CostFunction, CostKind, EdgeTraversal, SoftModifierKind};

/// `base + Σ modifiers`.  Speed is the base speed.
pub struct AdditionWeighting<'a> {
    base:      Box<dyn CostFunction + 'a>,
    modifiers: Vec<Box<dyn CostFunction + 'a>>,
}

impl<'a> AdditionWeighting<'a> {
    pub fn new(base: Box<dyn CostFunction + 'a>, modifiers: Vec<Box<dyn CostFunction + 'a>>) -> Self {
        Self { base, modifiers }
    }

    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }
}

impl CostFunction for AdditionWeighting<'_> {
    fn cost(&self, t: &EdgeTraversal) -> f64 {
        let base = self.base.cost(t);
        if base.is_infinite() {
            return base;
        }
        base + self.modifiers.iter().map(|m| m.cost(t)).sum::<f64>()
    }

    #[inline]
    fn speed(&self, t: &EdgeTraversal) -> f64 {
        self.base.speed(t)
    }

    fn kind(&self) -> CostKind {
        CostKind::Addition
    }

    fn inner(&self) -> Option<&dyn CostFunction> {
        Some(self.base.as_ref())
    }

    fn modifier_kinds(&self) -> Vec<SoftModifierKind> {
        self.modifiers
            .iter()
            .filter_map(|m| match m.kind() {
                CostKind::Modifier(kind) => Some(kind),
                _ => None,
            })
            .collect()
    }
}

/// Layer the requested soft modifiers over `base`.
///
/// Does nothing unless `custom_weightings` is true.  Modifiers are built in
/// the order their first key appears in `config`; unknown names are skipped.
/// When no known modifier is requested the base is returned unwrapped.
pub fn compose_soft_weightings<'a, C>(
    config: &Configuration,
    base: Box<dyn CostFunction + 'a>,
    capability: &C,
    network: &'a RoadNetwork,
) -> Box<dyn CostFunction + 'a>
where
    C: TravelCapability + ?Sized,
{
    if !config.get_bool(params::CUSTOM_WEIGHTINGS, false) {
        return base;
    }

    let mut modifiers: Vec<Box<dyn CostFunction + 'a>> = Vec::new();
    for name in modifier_names(config) {
        match SoftModifierKind::from_name(name) {
            Some(kind) => {
                let params = modifier_params(name, config);
                debug!("adding soft weighting {kind} with {} parameter(s)", params.len());
                modifiers.push(kind.build(capability, &params, network));
            }
            None => debug!("skipping unknown soft weighting {name:?}"),
        }
    }

    if modifiers.is_empty() {
        base
    } else {
        Box::new(AdditionWeighting::new(base, modifiers))
    }
}
