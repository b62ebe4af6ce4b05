//! Marked and favorite lists
//!
//! Each resource type has two reserved lists stored as ordinary resources in
//! the default folder. Marked items are left out of practice sessions;
//! favorites are kept for later review.

use std::fmt;

use thiserror::Error;

use crate::resources::io as resource_io;
use crate::resources::{Entry, ResourceContext, ResourceError, ResourceId, ResourceType};

#[derive(Error, Debug)]
pub enum BookmarkError {
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("{0} cannot be bookmarked")]
    UnsupportedType(ResourceType),

    #[error("Cannot bookmark an empty item")]
    EmptyItem,
}

pub type Result<T> = std::result::Result<T, BookmarkError>;

/// The reserved lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkList {
    Marked,
    Favorite,
}

impl BookmarkList {
    pub const ALL: [BookmarkList; 2] = [BookmarkList::Marked, BookmarkList::Favorite];

    /// Resource name of the list
    pub fn name(&self) -> &'static str {
        match self {
            Self::Marked => "标记",
            Self::Favorite => "收藏",
        }
    }

    /// Match an identifier to a list. Only the default folder holds the
    /// reserved lists; `travel/标记` is an ordinary resource.
    pub fn from_name(name: &str) -> Option<Self> {
        let id = ResourceId::parse(name);
        if !id.is_default_folder() {
            return None;
        }
        Self::ALL.into_iter().find(|list| list.name() == id.base_name())
    }

    fn id(&self) -> ResourceId {
        ResourceId::parse(self.name())
    }
}

impl fmt::Display for BookmarkList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether `identifier` names one of the reserved lists
pub fn is_special_list(identifier: &str) -> bool {
    BookmarkList::from_name(identifier).is_some()
}

/// Articles are read whole and cannot be bookmarked
pub fn supports_mark(resource_type: ResourceType) -> bool {
    !resource_type.is_article()
}

fn ensure_supported(resource_type: ResourceType) -> Result<()> {
    if supports_mark(resource_type) {
        Ok(())
    } else {
        Err(BookmarkError::UnsupportedType(resource_type))
    }
}

/// Entries of a list, blank lines dropped
pub fn items(ctx: &ResourceContext, resource_type: ResourceType, list: BookmarkList) -> Result<Vec<Entry>> {
    let entries = resource_io::read(ctx, resource_type, &list.id())?;
    Ok(entries.into_iter().filter(|e| !e.is_blank()).collect())
}

pub fn contains(ctx: &ResourceContext, resource_type: ResourceType, list: BookmarkList, entry: &Entry) -> Result<bool> {
    if entry.is_blank() {
        return Ok(false);
    }
    Ok(items(ctx, resource_type, list)?.contains(entry))
}

/// First entry of a list whose primary text matches `primary`
pub fn find(ctx: &ResourceContext, resource_type: ResourceType, list: BookmarkList, primary: &str) -> Result<Option<Entry>> {
    let primary = primary.trim();
    Ok(items(ctx, resource_type, list)?.into_iter().find(|e| e.primary == primary))
}

/// Append an entry. Returns whether it was newly added.
pub fn add(ctx: &ResourceContext, resource_type: ResourceType, list: BookmarkList, entry: &Entry) -> Result<bool> {
    ensure_supported(resource_type)?;
    if entry.is_blank() {
        return Err(BookmarkError::EmptyItem);
    }

    let mut entries = items(ctx, resource_type, list)?;
    if entries.contains(entry) {
        return Ok(false);
    }

    entries.push(entry.clone());
    resource_io::write(ctx, resource_type, &list.id(), &entries)?;
    log::debug!("Added '{}' to {} {}", entry.primary, resource_type, list);
    Ok(true)
}

/// Drop an entry. Returns whether it was present.
pub fn remove(ctx: &ResourceContext, resource_type: ResourceType, list: BookmarkList, entry: &Entry) -> Result<bool> {
    ensure_supported(resource_type)?;
    if entry.is_blank() {
        return Err(BookmarkError::EmptyItem);
    }

    let mut entries = items(ctx, resource_type, list)?;
    let before = entries.len();
    entries.retain(|existing| existing != entry);
    if entries.len() == before {
        return Ok(false);
    }

    resource_io::write(ctx, resource_type, &list.id(), &entries)?;
    log::debug!("Removed '{}' from {} {}", entry.primary, resource_type, list);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_context() -> (ResourceContext, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ResourceContext::new(
            "english",
            temp_dir.path().join("resources"),
            temp_dir.path().join("user-data"),
        );
        (ctx, temp_dir)
    }

    #[test]
    fn test_special_list_names() {
        assert!(is_special_list("标记"));
        assert!(is_special_list("收藏.txt"));
        assert!(is_special_list("default/标记"));
        assert!(!is_special_list("verbs"));
        assert_eq!(BookmarkList::from_name("收藏"), Some(BookmarkList::Favorite));
        assert_eq!(BookmarkList::from_name("默认/收藏"), Some(BookmarkList::Favorite));
    }

    #[test]
    fn test_same_name_in_other_folder_is_ordinary() {
        assert!(!is_special_list("travel/标记"));
        assert!(!is_special_list("travel\\收藏.txt"));
        assert_eq!(BookmarkList::from_name("notes/收藏"), None);
    }

    #[test]
    fn test_supports_mark() {
        assert!(supports_mark(ResourceType::Words));
        assert!(supports_mark(ResourceType::Sentences));
        assert!(!supports_mark(ResourceType::Articles));
    }

    #[test]
    fn test_add_contains_remove() {
        let (ctx, _temp) = create_test_context();
        let entry = Entry::new(" apple ", "苹果");

        assert!(add(&ctx, ResourceType::Words, BookmarkList::Marked, &entry).unwrap());
        assert!(!add(&ctx, ResourceType::Words, BookmarkList::Marked, &Entry::new("apple", "苹果")).unwrap());
        assert!(contains(&ctx, ResourceType::Words, BookmarkList::Marked, &entry).unwrap());
        assert!(!contains(&ctx, ResourceType::Words, BookmarkList::Favorite, &entry).unwrap());

        let path = ctx.user_root.join("english/words/default/标记.txt");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "apple ->> 苹果\n");

        assert!(remove(&ctx, ResourceType::Words, BookmarkList::Marked, &entry).unwrap());
        assert!(!remove(&ctx, ResourceType::Words, BookmarkList::Marked, &entry).unwrap());
        assert!(items(&ctx, ResourceType::Words, BookmarkList::Marked).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_empty_and_articles() {
        let (ctx, _temp) = create_test_context();

        let err = add(&ctx, ResourceType::Words, BookmarkList::Favorite, &Entry::new(" ", "")).unwrap_err();
        assert!(matches!(err, BookmarkError::EmptyItem));

        let err = add(&ctx, ResourceType::Articles, BookmarkList::Favorite, &Entry::new("Once", "")).unwrap_err();
        assert!(matches!(err, BookmarkError::UnsupportedType(ResourceType::Articles)));
    }

    #[test]
    fn test_multiword_item_found_by_primary() {
        let (ctx, _temp) = create_test_context();
        add(&ctx, ResourceType::Phrases, BookmarkList::Marked, &Entry::new("take off", "起飞")).unwrap();

        let typed = Entry::from_item("take off");
        assert_eq!(typed, Entry::new("take off", ""));

        let found = find(&ctx, ResourceType::Phrases, BookmarkList::Marked, &typed.primary).unwrap();
        assert_eq!(found, Some(Entry::new("take off", "起飞")));
        assert!(remove(&ctx, ResourceType::Phrases, BookmarkList::Marked, &found.unwrap()).unwrap());
        assert!(items(&ctx, ResourceType::Phrases, BookmarkList::Marked).unwrap().is_empty());
    }

    #[test]
    fn test_lists_are_per_type() {
        let (ctx, _temp) = create_test_context();
        let entry = Entry::new("take off", "起飞");

        add(&ctx, ResourceType::Phrases, BookmarkList::Favorite, &entry).unwrap();
        assert!(items(&ctx, ResourceType::Words, BookmarkList::Favorite).unwrap().is_empty());
        assert_eq!(
            items(&ctx, ResourceType::Phrases, BookmarkList::Favorite).unwrap(),
            vec![entry]
        );
    }
}
