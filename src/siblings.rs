//! Sibling discovery for "next issue" navigation.
//!
//! Siblings are the other comic archives in the directory of the open comic,
//! ordered the way a human orders issue files: digit runs compare
//! numerically, so `issue-2.cbz` sorts before `issue-10.cbz`.

use std::cmp::Ordering;

use crate::api::DirEntry;

/// Comic container extensions eligible for sibling chaining.
pub const COMIC_EXTENSIONS: [&str; 7] = ["cbz", "cbr", "cb7", "zip", "rar", "7z", "pdf"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sibling {
    pub path: String,
    pub display_name: String,
    pub thumbnail_ref: Option<String>,
}

pub fn is_comic_file(name: &str) -> bool {
    let Some((_, extension)) = name.rsplit_once('.') else {
        return false;
    };
    COMIC_EXTENSIONS
        .iter()
        .any(|known| extension.eq_ignore_ascii_case(known))
}

/// Filter a directory listing down to comic files, in issue order.
pub fn siblings_from_listing(entries: &[DirEntry]) -> Vec<Sibling> {
    let mut siblings: Vec<Sibling> = entries
        .iter()
        .filter(|entry| !entry.is_dir && is_comic_file(&entry.name))
        .map(|entry| Sibling {
            path: entry.path.clone(),
            display_name: display_name(&entry.name),
            thumbnail_ref: entry.thumbnail.clone(),
        })
        .collect();
    siblings.sort_by(|a, b| natural_cmp(&a.display_name, &b.display_name));
    siblings
}

/// Index of `path` within the sibling list, if it is there at all.
pub fn locate(siblings: &[Sibling], path: &str) -> Option<usize> {
    siblings.iter().position(|sibling| sibling.path == path)
}

/// The containing directory of a `/`-separated comic path.
pub fn parent_dir(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((parent, _)) => parent,
        None => "",
    }
}

fn display_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

/// Case-insensitive comparison where runs of digits compare as numbers.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(lc), Some(rc)) => {
                if lc.is_ascii_digit() && rc.is_ascii_digit() {
                    let ln = take_digit_run(&mut left);
                    let rn = take_digit_run(&mut right);
                    match compare_digit_runs(&ln, &rn) {
                        Ordering::Equal => continue,
                        other => return other,
                    }
                }
                let lc = lc.to_ascii_lowercase();
                let rc = rc.to_ascii_lowercase();
                if lc != rc {
                    return lc.cmp(&rc);
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digit_run(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(ch) = chars.peek().copied() {
        if !ch.is_ascii_digit() {
            break;
        }
        run.push(ch);
        chars.next();
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
