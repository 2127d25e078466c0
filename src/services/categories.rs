use std::collections::HashMap;

use crate::domain::category::{Category, CategoryTreeNode};
use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the categories index template.
pub struct CategoryTreeData {
    /// Hierarchical representation of the categories.
    pub tree: Vec<CategoryTreeNode>,
    /// Flat list sorted by name, used for parent pickers.
    pub flat: Vec<Category>,
}

/// Loads the categories overview page.
pub fn load_categories<R>(repo: &R) -> ServiceResult<CategoryTreeData>
where
    R: CategoryReader + ?Sized,
{
    let mut flat = repo.list_categories().map_err(ServiceError::from)?;

    if flat.is_empty() {
        return Ok(CategoryTreeData {
            tree: Vec::new(),
            flat,
        });
    }

    flat.sort_by(|a, b| a.name.cmp(&b.name));
    let tree = build_category_tree(&flat);

    Ok(CategoryTreeData { tree, flat })
}

/// Creates a new category.
pub fn create_category<R>(repo: &R, form: AddCategoryForm) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let new_category = form
        .into_new_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_category(&new_category)
        .map_err(ServiceError::from)
}

/// Renames or re-parents an existing category.
pub fn modify_category<R>(repo: &R, form: EditCategoryForm) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let payload = form
        .into_update_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_category(payload.category_id, &payload.update)
        .map_err(ServiceError::from)
}

/// Deletes a category; its children become roots.
pub fn remove_category<R>(repo: &R, category_id: i32) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    repo.delete_category(category_id)
        .map_err(ServiceError::from)
}

/// Nests `categories` under their parents. Siblings keep the input order, so
/// a name-sorted input yields name-sorted roots and children.
fn build_category_tree(categories: &[Category]) -> Vec<CategoryTreeNode> {
    let mut by_parent: HashMap<Option<i32>, Vec<Category>> = HashMap::new();
    for category in categories {
        by_parent
            .entry(category.parent_id)
            .or_default()
            .push(category.clone());
    }

    take_children(None, &mut by_parent)
}

// Each parent's bucket is removed once, so stored cycles cannot recurse forever.
fn take_children(
    parent_id: Option<i32>,
    by_parent: &mut HashMap<Option<i32>, Vec<Category>>,
) -> Vec<CategoryTreeNode> {
    by_parent
        .remove(&parent_id)
        .unwrap_or_default()
        .into_iter()
        .map(|category| {
            let children = take_children(Some(category.id), by_parent);
            CategoryTreeNode::new(category).with_children(children)
        })
        .collect()
}
