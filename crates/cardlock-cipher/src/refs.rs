//! Private image references across the encryption boundary.
//!
//! Card bodies are HTML and may embed uploaded images. Upload URLs issued by
//! the storage collaborator are short-lived signed URLs; freezing one inside
//! a ciphertext would leave the card pointing at a dead link. Before
//! encryption the caller rewrites each image `src` to the stable
//! `private://<storage-path>` form, and after decryption resolves those
//! references back into fresh signed URLs.
//!
//! This is plaintext-level text substitution, entirely outside the cipher
//! boundary — nothing here ever sees key material. Substitution is scoped to
//! quoted `src` attribute values and is otherwise byte-preserving; there is
//! no HTML parsing or entity handling, and markup that does not match passes
//! through unchanged.

use std::convert::Infallible;

/// URL scheme marking an image reference that must be resolved through the
/// storage collaborator after decryption.
pub const PRIVATE_SCHEME: &str = "private://";

/// Rewrite image sources to their private form before encryption.
///
/// For every quoted `src` attribute value, `to_storage_path` is asked for
/// the storage path behind the URL. `Some(path)` rewrites the value to
/// `private://<path>`; `None` leaves it untouched (external images stay
/// external). Values already in private form are never re-wrapped.
pub fn conceal_image_sources(
    html: &str,
    mut to_storage_path: impl FnMut(&str) -> Option<String>,
) -> String {
    let result = try_rewrite_src_values(html, |value| {
        if value.starts_with(PRIVATE_SCHEME) {
            return Ok::<_, Infallible>(None);
        }
        Ok(to_storage_path(value).map(|path| format!("{PRIVATE_SCHEME}{path}")))
    });
    match result {
        Ok(rewritten) => rewritten,
        Err(never) => match never {},
    }
}

/// Resolve private image references back into live URLs after decryption.
///
/// For every `src` value of the form `private://<path>`, `sign` is asked
/// for a fresh signed URL for `<path>`. Non-private sources pass through
/// unchanged.
///
/// # Errors
///
/// Propagates the first error returned by `sign` unchanged.
pub fn resolve_image_sources<E>(
    html: &str,
    mut sign: impl FnMut(&str) -> Result<String, E>,
) -> Result<String, E> {
    try_rewrite_src_values(html, |value| match value.strip_prefix(PRIVATE_SCHEME) {
        Some(path) => sign(path).map(Some),
        None => Ok(None),
    })
}

/// List the storage paths referenced by a card body, in document order.
///
/// Callers use this to prefetch signed URLs before rendering, or to decide
/// which uploads are still referenced.
pub fn private_references(html: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let result = try_rewrite_src_values(html, |value| {
        if let Some(path) = value.strip_prefix(PRIVATE_SCHEME) {
            paths.push(path.to_owned());
        }
        Ok::<_, Infallible>(None)
    });
    match result {
        Ok(_) => paths,
        Err(never) => match never {},
    }
}

/// Walk every quoted `src` attribute value in `html`, replacing each one for
/// which `rewrite` returns `Ok(Some(_))`. Everything outside the attribute
/// values is copied through byte-for-byte.
fn try_rewrite_src_values<E>(
    html: &str,
    mut rewrite: impl FnMut(&str) -> Result<Option<String>, E>,
) -> Result<String, E> {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some((value_start, value_end)) = next_src_value(rest) {
        out.push_str(&rest[..value_start]);
        let value = &rest[value_start..value_end];
        match rewrite(value)? {
            Some(replacement) => out.push_str(&replacement),
            None => out.push_str(value),
        }
        rest = &rest[value_end..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Locate the next quoted `src` attribute value, returning the byte range of
/// the value between its quotes. Returns `None` when no further well-formed
/// `src="…"` (or `src='…'`) occurrence exists.
fn next_src_value(html: &str) -> Option<(usize, usize)> {
    let bytes = html.as_bytes();
    let mut search = 0;
    loop {
        let start = search + html[search..].find("src")?;
        search = start + 3;

        // Must sit at an attribute boundary, not inside a longer word.
        if start > 0 && !bytes[start - 1].is_ascii_whitespace() {
            continue;
        }

        let mut i = start + 3;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || (bytes[i] != b'"' && bytes[i] != b'\'') {
            continue;
        }
        let quote = bytes[i] as char;
        let value_start = i + 1;
        // An unterminated quote ends the scan; the tail passes through.
        let value_end = value_start + html[value_start..].find(quote)?;
        return Some((value_start, value_end));
    }
}
