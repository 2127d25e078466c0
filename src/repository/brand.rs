use diesel::prelude::*;

use crate::domain::brand::{
    Brand as DomainBrand, NewBrand as DomainNewBrand, UpdateBrand as DomainUpdateBrand,
};
use crate::models::brand::{Brand as DbBrand, NewBrand as DbNewBrand, UpdateBrand as DbUpdateBrand};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{BrandReader, BrandWriter, DieselRepository};

impl BrandReader for DieselRepository {
    fn list_brands(&self) -> RepositoryResult<Vec<DomainBrand>> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let brands = brands::table
            .order(brands::name.asc())
            .load::<DbBrand>(&mut conn)?;

        Ok(brands.into_iter().map(DomainBrand::from).collect())
    }

    fn get_brand_by_id(&self, id: i32) -> RepositoryResult<Option<DomainBrand>> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let brand = brands::table
            .filter(brands::id.eq(id))
            .first::<DbBrand>(&mut conn)
            .optional()?;

        Ok(brand.map(DomainBrand::from))
    }
}

impl BrandWriter for DieselRepository {
    fn create_brand(&self, new_brand: &DomainNewBrand) -> RepositoryResult<DomainBrand> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let insertable = DbNewBrand::from(new_brand);

        let created = diesel::insert_into(brands::table)
            .values(&insertable)
            .get_result::<DbBrand>(&mut conn)?;

        Ok(created.into())
    }

    fn update_brand(
        &self,
        brand_id: i32,
        updates: &DomainUpdateBrand,
    ) -> RepositoryResult<DomainBrand> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let db_updates = DbUpdateBrand::from(updates);

        let updated = diesel::update(brands::table.filter(brands::id.eq(brand_id)))
            .set(&db_updates)
            .get_result::<DbBrand>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_brand(&self, brand_id: i32) -> RepositoryResult<()> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let deleted =
            diesel::delete(brands::table.filter(brands::id.eq(brand_id))).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
