//! Remembers recently opened comics.
//!
//! A single TOML file under `.cache/` holds the most recent comic paths so
//! the open screen can offer them again. Write errors are ignored to keep
//! the UI responsive; reading positions themselves live on the backend, this
//! is purely local convenience state.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const CACHE_DIR: &str = ".cache";
const RECENT_FILE: &str = "recent.toml";
const MAX_RECENT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentComic {
    pub path: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecentFile {
    #[serde(default)]
    comics: Vec<RecentComic>,
}

pub fn list_recent() -> Vec<RecentComic> {
    let Ok(data) = fs::read_to_string(recent_path()) else {
        return Vec::new();
    };
    toml::from_str::<RecentFile>(&data)
        .map(|file| file.comics)
        .unwrap_or_default()
}

pub fn remember(path: &str) {
    let comics = push_recent(list_recent(), path);
    let file = RecentFile { comics };
    let target = recent_path();
    if let Some(parent) = target.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(contents) = toml::to_string(&file) {
        let _ = fs::write(target, contents);
    }
}

/// Most recent first, deduplicated, capped.
fn push_recent(mut comics: Vec<RecentComic>, path: &str) -> Vec<RecentComic> {
    comics.retain(|comic| comic.path != path);
    comics.insert(
        0,
        RecentComic {
            path: path.to_string(),
        },
    );
    comics.truncate(MAX_RECENT);
    comics
}

fn recent_path() -> PathBuf {
    PathBuf::from(CACHE_DIR).join(RECENT_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(comics: &[RecentComic]) -> Vec<&str> {
        comics.iter().map(|c| c.path.as_str()).collect()
    }

    #[test]
    fn reopening_moves_a_comic_to_the_front() {
        let list = push_recent(Vec::new(), "a.cbz");
        let list = push_recent(list, "b.cbz");
        let list = push_recent(list, "a.cbz");
        assert_eq!(paths(&list), vec!["a.cbz", "b.cbz"]);
    }

    #[test]
    fn the_list_is_capped() {
        let mut list = Vec::new();
        for n in 0..20 {
            list = push_recent(list, &format!("{n}.cbz"));
        }
        assert_eq!(list.len(), MAX_RECENT);
        assert_eq!(list[0].path, "19.cbz");
    }
}
