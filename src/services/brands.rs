use crate::domain::brand::Brand;
use crate::forms::brands::{AddBrandForm, EditBrandForm};
use crate::repository::{BrandReader, BrandWriter};
use crate::services::{ServiceError, ServiceResult};

/// All brands ordered by name.
pub fn load_brands<R>(repo: &R) -> ServiceResult<Vec<Brand>>
where
    R: BrandReader + ?Sized,
{
    repo.list_brands().map_err(ServiceError::from)
}

/// Creates a new brand from the submitted form.
pub fn create_brand<R>(repo: &R, form: AddBrandForm) -> ServiceResult<Brand>
where
    R: BrandWriter + ?Sized,
{
    let new_brand = form
        .into_new_brand()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_brand(&new_brand).map_err(ServiceError::from)
}

/// Replaces the name and website of an existing brand.
pub fn modify_brand<R>(repo: &R, form: EditBrandForm) -> ServiceResult<Brand>
where
    R: BrandWriter + ?Sized,
{
    let payload = form
        .into_update_brand()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_brand(payload.brand_id, &payload.update)
        .map_err(ServiceError::from)
}

/// Deletes a brand together with its product associations.
pub fn remove_brand<R>(repo: &R, brand_id: i32) -> ServiceResult<()>
where
    R: BrandWriter + ?Sized,
{
    repo.delete_brand(brand_id).map_err(ServiceError::from)
}
