//! Namespaced soft-modifier keys: `weighting_#<name>_<param>`.
//!
//! Modifier names may themselves contain underscores (`avoid_hills`), so a
//! key is split at the end of the longest known modifier name it starts
//! with.  Names the engine does not know are split at their first `_`.

use strum::IntoEnumIterator;

use wt_core::Configuration;

use crate::{params::MODIFIER_PREFIX, SoftModifierKind};

/// A decoded `weighting_#...` key.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct NamespacedKey<'k> {
    pub modifier: &'k str,
    /// `None` for a bare `weighting_#<name>` key.
    pub param:    Option<&'k str>,
}

/// `true` if `rest` is `name` alone or `name` followed by `_`.
fn starts_with_name(rest: &str, name: &str) -> bool {
    rest.strip_prefix(name)
        .is_some_and(|tail| tail.is_empty() || tail.starts_with('_'))
}

/// Decode a configuration key; `None` if it is not a modifier key.
pub fn decode_key(key: &str) -> Option<NamespacedKey<'_>> {
    let rest = key.strip_prefix(MODIFIER_PREFIX)?;

    let known = SoftModifierKind::iter()
        .map(SoftModifierKind::as_str)
        .filter(|name| starts_with_name(rest, name))
        .max_by_key(|name| name.len());

    let (modifier, param) = match known {
        Some(name) => {
            let (modifier, tail) = rest.split_at(name.len());
            (modifier, tail.strip_prefix('_'))
        }
        None => match rest.split_once('_') {
            Some((modifier, param)) => (modifier, Some(param)),
            None => (rest, None),
        },
    };

    if modifier.is_empty() {
        return None;
    }
    Some(NamespacedKey { modifier, param: param.filter(|p| !p.is_empty()) })
}

/// Distinct modifier names in the order their first key appears.
pub fn modifier_names(config: &Configuration) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for key in config.keys() {
        if let Some(decoded) = decode_key(key) {
            if !names.contains(&decoded.modifier) {
                names.push(decoded.modifier);
            }
        }
    }
    names
}

/// Parameters of modifier `name` with the namespace prefix stripped.
///
/// A key that decodes to a longer modifier name sharing this prefix belongs
/// to that modifier and is skipped (`weighting_#avoid_hills_factor` is not
/// parameter `hills_factor` of a modifier called `avoid`).
pub fn modifier_params(name: &str, config: &Configuration) -> Configuration {
    let prefix = format!("{MODIFIER_PREFIX}{name}_");
    config
        .iter()
        .filter_map(|(key, value)| {
            let param = key.strip_prefix(prefix.as_str())?;
            if param.is_empty() {
                return None;
            }
            let shadowed = decode_key(key).is_some_and(|k| k.modifier.len() > name.len());
            (!shadowed).then(|| (param.to_owned(), value.clone()))
        })
        .collect()
}
