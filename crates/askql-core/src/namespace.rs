//! Wiki namespace numbers and their canonical names.

/// Namespace number as stored in the identity relation.
pub type NamespaceId = i32;

pub const MAIN: NamespaceId = 0;
pub const TALK: NamespaceId = 1;
pub const USER: NamespaceId = 2;
pub const PROJECT: NamespaceId = 4;
pub const FILE: NamespaceId = 6;
pub const MEDIAWIKI: NamespaceId = 8;
pub const TEMPLATE: NamespaceId = 10;
pub const HELP: NamespaceId = 12;
pub const CATEGORY: NamespaceId = 14;
pub const PROPERTY: NamespaceId = 102;
pub const CONCEPT: NamespaceId = 108;

const NAMES: &[(NamespaceId, &str)] = &[
    (MAIN, ""),
    (TALK, "Talk"),
    (USER, "User"),
    (PROJECT, "Project"),
    (FILE, "File"),
    (MEDIAWIKI, "MediaWiki"),
    (TEMPLATE, "Template"),
    (HELP, "Help"),
    (CATEGORY, "Category"),
    (PROPERTY, "Property"),
    (CONCEPT, "Concept"),
];

/// Canonical name of a namespace (`""` for the main namespace).
pub fn name_of(ns: NamespaceId) -> Option<&'static str> {
    NAMES.iter().find(|(id, _)| *id == ns).map(|(_, name)| *name)
}

/// Look up a namespace by name. Matching ignores ASCII case and treats
/// underscores as spaces.
pub fn by_name(name: &str) -> Option<NamespaceId> {
    let name = name.trim().replace('_', " ");
    NAMES
        .iter()
        .find(|(_, candidate)| candidate.eq_ignore_ascii_case(&name))
        .map(|(id, _)| *id)
}
