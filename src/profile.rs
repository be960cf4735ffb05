//! Line-oriented handling of `[name]` / `key = value` profile files.
//!
//! No comments, quoting or multi-line values. Lines outside the section being
//! replaced are passed through untouched.

use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Range;

use crate::{aws::sts::CredentialBundle, expiry::format_expiration};

pub const ACCESS_KEY_ID: &str = "aws_access_key_id";
pub const SECRET_ACCESS_KEY: &str = "aws_secret_access_key";
pub const SECURITY_TOKEN: &str = "aws_security_token";
pub const TOKEN_EXPIRATION: &str = "aws_token_expiration";

lazy_static! {
    static ref HEADER_LINE: Regex = Regex::new(r"^\s*\[([^\]]+)\]\s*$").unwrap();
}

fn header_name(line: &str) -> Option<&str> {
    HEADER_LINE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Value of `key` in the last line that carries it.
///
/// Every line containing `key` is split on the first `"{key} = "`; the
/// remainder replaces any earlier candidate. Lines mentioning the key without
/// the separator contribute nothing.
pub fn find_value<S: AsRef<str>>(lines: &[S], key: &str) -> Option<String> {
    let separator = format!("{key} = ");
    let mut found = None;
    for line in lines.iter().map(AsRef::as_ref) {
        if !line.contains(key) {
            continue;
        }
        if let Some((_, value)) = line.split_once(separator.as_str()) {
            found = Some(value.trim_end().to_string());
        }
    }
    found
}

/// Line range owned by the section headed `[profile]`: the header itself up
/// to, but excluding, the next header (or the end of `lines`).
///
/// With duplicate headers the last one wins.
pub fn find_section<S: AsRef<str>>(lines: &[S], profile: &str) -> Option<Range<usize>> {
    let start = lines
        .iter()
        .rposition(|line| header_name(line.as_ref()) == Some(profile))?;
    let end = lines[start + 1..]
        .iter()
        .position(|line| header_name(line.as_ref()).is_some())
        .map_or(lines.len(), |offset| start + 1 + offset);
    Some(start..end)
}

/// Renders the credentials block for `profile`.
///
/// The text ends with a newline so that whatever follows it is separated by
/// a blank line.
pub fn render_section(profile: &str, bundle: &CredentialBundle) -> String {
    format!(
        "[{profile}]\n\
         {ACCESS_KEY_ID} = {access_key_id}\n\
         {SECRET_ACCESS_KEY} = {secret_access_key}\n\
         {SECURITY_TOKEN} = {session_token}\n\
         {TOKEN_EXPIRATION} = {expiration}\n",
        access_key_id = bundle.access_key_id,
        secret_access_key = bundle.secret_access_key,
        session_token = bundle.session_token,
        expiration = format_expiration(&bundle.expiration),
    )
}

/// Replaces the `[profile]` section of `lines` with `section`, or appends
/// `section` after a blank line when there is no such section.
///
/// `section` is kept as a single (multi-line) entry; join the result with
/// `\n` to get the file body.
pub fn merge_section(mut lines: Vec<String>, profile: &str, section: &str) -> Vec<String> {
    match find_section(&lines, profile) {
        Some(range) => {
            lines.drain(range.start + 1..range.end);
            lines[range.start] = section.to_string();
        }
        None => {
            lines.push(String::new());
            lines.push(section.to_string());
        }
    }
    lines
}
