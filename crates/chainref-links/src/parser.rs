//! Parsing of link keys and target links.
//!
//! Target links are parsed by matching the path, segment for segment,
//! against every link template. Literal segments must match exactly and
//! each placeholder takes one non-empty segment. Exactly one template may
//! match; anything else is [`LinkError::MalformedInput`]. Recovered values
//! go through the same validation as [`LinkPath::insert`].

use crate::error::{LinkError, Result};
use crate::link::{Link, PLACEHOLDER};
use crate::path::LinkPath;
use crate::registration::{defaults, RegistrationType, CHAIN_LINK_KEY_PREFIX};
use crate::registry::Registry;

/// True iff `s` starts with `ChainLink:`.
pub fn is_link_key(s: &str) -> bool {
    s.starts_with(CHAIN_LINK_KEY_PREFIX)
}

/// The part of a link key after `ChainLink:`.
pub fn link_key_value(s: &str) -> Option<&str> {
    s.strip_prefix(CHAIN_LINK_KEY_PREFIX)
}

/// The part of a link key after `ChainLink:`, or the input unchanged.
pub fn link_key_value_or_input(s: &str) -> &str {
    link_key_value(s).unwrap_or(s)
}

/// Resolve a link key to its registration type.
///
/// The bare key `ChainLink` resolves to the ChainLink type.
pub fn link_key_type<'r>(s: &str, registry: &'r Registry) -> Option<&'r RegistrationType> {
    match link_key_value(s) {
        Some(name) => registry.get(name),
        None if s == defaults::CHAIN_LINK.name() => registry.get(s),
        None => None,
    }
}

/// Reconstruct the recorded parts of a target link.
pub fn target_link_parts(path: &str) -> Result<LinkPath> {
    if path.is_empty() {
        return Err(LinkError::malformed("empty target link"));
    }

    let mut parts = LinkPath::new();
    let Some(rest) = path.strip_prefix('/') else {
        parts.insert(Link::None, path)?;
        return Ok(parts);
    };

    let segments: Vec<&str> = rest.split('/').collect();
    let mut matches = Link::ALL
        .into_iter()
        .filter_map(|link| match_template(link, &segments).map(|values| (link, values)));
    let (link, values) = matches
        .next()
        .ok_or_else(|| LinkError::malformed(format!("unrecognized target link {path:?}")))?;
    if matches.next().is_some() {
        return Err(LinkError::malformed(format!("ambiguous target link {path:?}")));
    }

    let mut values = values.into_iter();
    for ancestor in link.ancestry() {
        // Content has no placeholder of its own.
        parts.insert(ancestor, values.next().unwrap_or_default())?;
    }
    Ok(parts)
}

/// The deepest link of a target link.
pub fn target_link_type(path: &str) -> Result<Link> {
    target_link_parts(path)?
        .last()
        .ok_or_else(|| LinkError::malformed(format!("no link in {path:?}")))
}

/// The value recorded for `link` in a target link, if present.
pub fn target_link_part(path: &str, link: Link) -> Result<Option<String>> {
    Ok(target_link_parts(path)?.get(link).map(str::to_string))
}

/// Placeholder values if `segments` has the shape of `link`'s template.
fn match_template<'a>(link: Link, segments: &[&'a str]) -> Option<Vec<&'a str>> {
    let template = link.template().strip_prefix('/')?;
    let expected: Vec<&str> = template.split('/').collect();
    if expected.len() != segments.len() {
        return None;
    }

    let mut values = Vec::new();
    for (want, got) in expected.iter().zip(segments) {
        if *want == PLACEHOLDER {
            if got.is_empty() {
                return None;
            }
            values.push(*got);
        } else if want != got {
            return None;
        }
    }
    Some(values)
}
