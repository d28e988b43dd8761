//! Anchor slug generation
//!
//! Every heading on an API page gets a stable anchor. Top-level symbols whose
//! name is not capitalized (free functions, variables) are moved into a
//! separate namespace with a prefix so they never collide with class member
//! anchors, which are built as `class.member` or `class-member`.

/// Normalize a string into a URL-safe token.
///
/// Whitespace runs become a single hyphen, characters outside the allowed
/// set are dropped. Case is preserved; callers lower-case as needed.
///
/// # Examples
///
/// ```
/// use typedoc_etch::slug::slugify;
///
/// assert_eq!(slugify("Hello World"), "Hello-World");
/// assert_eq!(slugify("globals-createStore"), "globals-createStore");
/// assert_eq!(slugify("a<b>"), "ab");
/// ```
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.trim().chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if !(c.is_alphanumeric() || "$*_+~.()'\"!:@-".contains(c)) {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push('-');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

/// Check if a name starts with an ASCII capital letter
pub fn is_capitalized(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Anchor for a top-level symbol.
///
/// # Examples
///
/// ```
/// use typedoc_etch::slug::to_slug;
///
/// assert_eq!(to_slug("BaseNode", "globals-"), "basenode");
/// assert_eq!(to_slug("createStore", "globals-"), "globals-createstore");
/// ```
pub fn to_slug(name: &str, globals_prefix: &str) -> String {
    let name = if is_capitalized(name) {
        name.to_string()
    } else {
        format!("{}{}", globals_prefix, name)
    };
    slugify(&name).to_lowercase()
}

/// Anchor for a class member: `.` for statics, `-` for instance members
pub fn member_slug(owner: &str, member: &str, is_static: bool) -> String {
    let sep = if is_static { "." } else { "-" };
    format!("{}{}{}", owner, sep, member).to_lowercase()
}

/// Anchor for a `{@link Name#member}` target.
///
/// The first `#` becomes `-` so the link lands on the instance member slug.
pub fn link_slug(target: &str, globals_prefix: &str) -> String {
    let link = target.to_lowercase().replacen('#', "-", 1);
    if is_capitalized(target) {
        link
    } else {
        format!("{}{}", globals_prefix, link)
    }
}
