//! Import and deletion of user resources
//!
//! Only the user overlay is ever modified. Anything that would require
//! touching the base root is rejected with a conflict.

use std::fs;
use std::path::Path;

use super::identifier::{build_identifier, normalize_folder, ResourceId, DEFAULT_FOLDER};
use super::locator::{locate, resolve_write_path};
use super::models::{ResourceContext, ResourceType};
use super::store::{Layer, ResourceError, ResourceStore, Result};

/// Copy a `.txt` file verbatim into `folder` of the user overlay.
///
/// Returns the identifier of the imported resource. An existing user copy
/// with the same name is replaced.
pub fn import(ctx: &ResourceContext, resource_type: ResourceType, folder: &str, source: &Path) -> Result<String> {
    if !source.is_file() {
        return Err(ResourceError::NotFound(source.display().to_string()));
    }

    let is_txt = source
        .extension()
        .map(|ext| ext == resource_type.extension())
        .unwrap_or(false);
    if !is_txt {
        return Err(ResourceError::UnsupportedFile(format!(
            "{} (expected a .{} file)",
            source.display(),
            resource_type.extension()
        )));
    }

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let identifier = build_identifier(folder, &stem);
    let id = ResourceId::parse(&identifier);

    let target = resolve_write_path(ctx, resource_type, &id)?;
    fs::copy(source, &target)?;

    log::info!("Imported {:?} as {}/{}", source, resource_type, identifier);
    Ok(id.to_string())
}

/// Delete a resource from the user overlay
pub fn delete(ctx: &ResourceContext, resource_type: ResourceType, identifier: &str) -> Result<()> {
    let id = ResourceId::parse(identifier);

    match locate(ctx, resource_type, &id) {
        Some(found) if found.layer == Layer::User => {
            ctx.store().user().remove(&found.rel)?;
            log::info!("Deleted resource {:?}", found.path);
            Ok(())
        }
        Some(_) => Err(ResourceError::Conflict(format!(
            "{} is bundled content and cannot be deleted",
            id
        ))),
        None => Err(ResourceError::NotFound(format!("{}/{}", resource_type, id))),
    }
}

/// Remove an empty user folder.
///
/// The default folder, folders that still hold bundled files and folders
/// with user files left in them are all rejected.
pub fn delete_folder(ctx: &ResourceContext, resource_type: ResourceType, folder: &str) -> Result<()> {
    let (normalized, _) = normalize_folder(folder);
    if normalized == DEFAULT_FOLDER {
        return Err(ResourceError::Conflict("the default folder cannot be deleted".to_string()));
    }

    let store = ctx.store();
    let rel = ctx.type_dir(resource_type).join(&normalized);

    if store.base().list(&rel)?.iter().any(|entry| !entry.is_dir) {
        return Err(ResourceError::Conflict(format!(
            "folder '{}' still contains bundled resources",
            normalized
        )));
    }

    if !store.user().has_dir(&rel) {
        return Err(ResourceError::NotFound(format!("folder '{}'", normalized)));
    }
    if !store.user().list(&rel)?.is_empty() {
        return Err(ResourceError::Conflict(format!("folder '{}' is not empty", normalized)));
    }

    store.user().remove_dir(&rel)?;
    log::info!("Deleted folder {}/{}", resource_type, normalized);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::catalog::list_files;
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

    fn put(root: &Path, rel: &str, content: &str) -> std::path::PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_import_copies_verbatim() {
        let (ctx, temp) = create_test_context();
        let source = put(temp.path(), "downloads/verbs.txt", "run\n跑\n\nwalk\n走\n");

        let id = import(&ctx, ResourceType::Sentences, "My Notes/2024", &source).unwrap();
        assert_eq!(id, "My Notes_2024/verbs");

        let target = ctx.user_root.join("english/sentences/My Notes_2024/verbs.txt");
        assert_eq!(fs::read_to_string(target).unwrap(), "run\n跑\n\nwalk\n走\n");
        assert_eq!(list_files(&ctx, ResourceType::Sentences).unwrap(), vec![id]);
    }

    #[test]
    fn test_import_rejects_missing_and_non_txt() {
        let (ctx, temp) = create_test_context();

        let err = import(&ctx, ResourceType::Words, "", &temp.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));

        let csv = put(temp.path(), "downloads/verbs.csv", "a,b\n");
        let err = import(&ctx, ResourceType::Words, "", &csv).unwrap_err();
        assert!(matches!(err, ResourceError::UnsupportedFile(_)));
    }

    #[test]
    fn test_delete_user_resource() {
        let (ctx, _temp) = create_test_context();
        let path = put(&ctx.user_root, "english/words/travel/verbs.txt", "go\n");

        delete(&ctx, ResourceType::Words, "travel/verbs").unwrap();
        assert!(!path.exists());

        let err = delete(&ctx, ResourceType::Words, "travel/verbs").unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));
    }

    #[test]
    fn test_delete_legacy_user_resource() {
        let (ctx, _temp) = create_test_context();
        let path = put(&ctx.user_root, "english/words/old.txt", "go\n");

        let found = locate(&ctx, ResourceType::Words, &ResourceId::parse("old")).unwrap();
        assert_eq!(found.rel, Path::new("english/words/old.txt"));

        delete(&ctx, ResourceType::Words, "old").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_delete_base_resource_is_conflict() {
        let (ctx, _temp) = create_test_context();
        let path = put(&ctx.base_root, "english/words/default/colors.txt", "red\n");

        let err = delete(&ctx, ResourceType::Words, "colors").unwrap_err();
        assert!(matches!(err, ResourceError::Conflict(_)));
        assert!(path.exists());
    }

    #[test]
    fn test_delete_folder_rules() {
        let (ctx, _temp) = create_test_context();

        let err = delete_folder(&ctx, ResourceType::Words, "默认").unwrap_err();
        assert!(matches!(err, ResourceError::Conflict(_)));

        let err = delete_folder(&ctx, ResourceType::Words, "ghost").unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));

        put(&ctx.base_root, "english/words/shipped/a.txt", "a\n");
        fs::create_dir_all(ctx.user_root.join("english/words/shipped")).unwrap();
        let err = delete_folder(&ctx, ResourceType::Words, "shipped").unwrap_err();
        assert!(matches!(err, ResourceError::Conflict(_)));

        let file = put(&ctx.user_root, "english/words/mine/b.txt", "b\n");
        let err = delete_folder(&ctx, ResourceType::Words, "mine").unwrap_err();
        assert!(matches!(err, ResourceError::Conflict(_)));

        fs::remove_file(file).unwrap();
        delete_folder(&ctx, ResourceType::Words, " mine ").unwrap();
        assert!(!ctx.user_root.join("english/words/mine").exists());
    }
}
