use std::collections::HashMap;

use super::types::{ResponseTemplates, SlotBranches, TemplateContent, TemplateNode};
use crate::kernel::event::{SlotName, SlotValue};
use crate::kernel::random::RandomSource;

impl ResponseTemplates {
    /// Resolves speech content for an intent and its slots.
    ///
    /// Shape is deterministic for fixed inputs; only the leaf pick draws from `rng`.
    /// Slot branches are tried in table order; the first exact slot/value match
    /// that yields content wins. A present slot whose value has no exact key uses
    /// that slot's own `""` list before the next slot is tried. Otherwise each
    /// level falls back to its own `""` list on the way back up, ending at the
    /// root wildcard. `None` means "say nothing", never an error.
    pub fn resolve(
        &self,
        intent_name: &str,
        slots: &HashMap<SlotName, SlotValue>,
        rng: &dyn RandomSource,
    ) -> Option<TemplateContent> {
        self.intents
            .get(intent_name)
            .and_then(|node| resolve_node(node, slots, rng))
            .or_else(|| self.wildcard.as_deref().and_then(|alts| pick(alts, rng)))
    }
}

fn resolve_node(
    node: &TemplateNode,
    slots: &HashMap<SlotName, SlotValue>,
    rng: &dyn RandomSource,
) -> Option<TemplateContent> {
    match node {
        TemplateNode::Literal(text) => Some(TemplateContent::Text(text.clone())),
        TemplateNode::Alternatives(alts) => pick(alts, rng),
        TemplateNode::BySlot(level) => resolve_level(level, slots, rng),
    }
}

fn resolve_level(
    level: &SlotBranches,
    slots: &HashMap<SlotName, SlotValue>,
    rng: &dyn RandomSource,
) -> Option<TemplateContent> {
    level
        .branches
        .iter()
        .find_map(|branch| {
            let value = slots.get(&branch.slot)?;
            branch
                .values
                .get(&value.value)
                .and_then(|child| resolve_node(child, slots, rng))
                .or_else(|| branch.fallback.as_deref().and_then(|alts| pick(alts, rng)))
        })
        .or_else(|| level.wildcard.as_deref().and_then(|alts| pick(alts, rng)))
}

fn pick(alts: &[TemplateContent], rng: &dyn RandomSource) -> Option<TemplateContent> {
    if alts.is_empty() {
        return None;
    }
    alts.get(rng.pick_index(alts.len())).cloned()
}
