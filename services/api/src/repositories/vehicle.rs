//! Vehicle repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use super::VehicleStore;
use crate::models::vehicle::decode_gallery;
use crate::models::{
    ImageRow, ImageSet, NewVehicle, NewVehicleFields, UsedVehicle, UsedVehicleFields,
    VehicleKind,
};

/// Vehicle repository over `vehicles_0km` and `vehicles_usados`
#[derive(Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    /// Create a new vehicle repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn new_vehicle_from_row(row: &PgRow) -> DatabaseResult<NewVehicle> {
    let images: Option<String> = row.try_get("images")?;

    Ok(NewVehicle {
        id: row.try_get("id")?,
        brand: row.try_get("brand")?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        financing_plan: row.try_get("plan")?,
        down_payment: row.try_get("anticipo")?,
        installment: row.try_get("cuota")?,
        description: row.try_get("description")?,
        image: row.try_get("image")?,
        images: decode_gallery(images.as_deref()),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn used_vehicle_from_row(row: &PgRow) -> DatabaseResult<UsedVehicle> {
    let images: Option<String> = row.try_get("images")?;

    Ok(UsedVehicle {
        id: row.try_get("id")?,
        brand: row.try_get("brand")?,
        model: row.try_get("modelo")?,
        year: row.try_get("year")?,
        mileage: row.try_get("km")?,
        price: row.try_get("price")?,
        description: row.try_get("description")?,
        image: row.try_get("image")?,
        images: decode_gallery(images.as_deref()),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl VehicleStore for VehicleRepository {
    async fn list_new(&self) -> DatabaseResult<Vec<NewVehicle>> {
        let rows = sqlx::query(
            r#"
            SELECT id, brand, name, price, plan, anticipo, cuota, description,
                   image, images, created_at, updated_at
            FROM vehicles_0km
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(new_vehicle_from_row).collect()
    }

    async fn list_used(&self) -> DatabaseResult<Vec<UsedVehicle>> {
        let rows = sqlx::query(
            r#"
            SELECT id, brand, modelo, year, km, price, description,
                   image, images, created_at, updated_at
            FROM vehicles_usados
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(used_vehicle_from_row).collect()
    }

    async fn count_new(&self) -> DatabaseResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM vehicles_0km")
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    async fn insert_new(&self, fields: &NewVehicleFields, images: &ImageSet) -> DatabaseResult<i32> {
        let row = sqlx::query(
            r#"
            INSERT INTO vehicles_0km
                (brand, name, price, plan, anticipo, cuota, description, image, images)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(fields.brand.as_deref().unwrap_or_default())
        .bind(fields.name.as_deref().unwrap_or_default())
        .bind(fields.price.as_deref())
        .bind(fields.financing_plan.as_deref())
        .bind(fields.down_payment.as_deref())
        .bind(fields.installment.as_deref())
        .bind(fields.description.as_deref())
        .bind(images.image.as_deref())
        .bind(images.gallery_column())
        .fetch_one(&self.pool)
        .await?;

        let id: i32 = row.try_get("id")?;
        info!("Created 0km vehicle {}", id);
        Ok(id)
    }

    async fn update_new(
        &self,
        id: i32,
        fields: &NewVehicleFields,
        images: Option<&ImageSet>,
    ) -> DatabaseResult<()> {
        info!("Updating 0km vehicle: {}", id);

        sqlx::query(
            r#"
            UPDATE vehicles_0km
            SET brand = COALESCE($1, brand),
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                plan = COALESCE($4, plan),
                anticipo = COALESCE($5, anticipo),
                cuota = COALESCE($6, cuota),
                description = COALESCE($7, description),
                image = CASE WHEN $8 THEN $9 ELSE image END,
                images = CASE WHEN $8 THEN $10 ELSE images END,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $11
            "#,
        )
        .bind(fields.brand.as_deref())
        .bind(fields.name.as_deref())
        .bind(fields.price.as_deref())
        .bind(fields.financing_plan.as_deref())
        .bind(fields.down_payment.as_deref())
        .bind(fields.installment.as_deref())
        .bind(fields.description.as_deref())
        .bind(images.is_some())
        .bind(images.and_then(|set| set.image.clone()))
        .bind(images.and_then(|set| set.gallery_column()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_used(
        &self,
        fields: &UsedVehicleFields,
        images: &ImageSet,
    ) -> DatabaseResult<UsedVehicle> {
        let row = sqlx::query(
            r#"
            INSERT INTO vehicles_usados
                (brand, modelo, year, km, price, description, image, images)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, brand, modelo, year, km, price, description,
                      image, images, created_at, updated_at
            "#,
        )
        .bind(fields.brand.as_deref().unwrap_or_default())
        .bind(fields.model.as_deref().unwrap_or_default())
        .bind(fields.year)
        .bind(fields.mileage.as_deref())
        .bind(fields.price.as_deref())
        .bind(fields.description.as_deref())
        .bind(images.image.as_deref())
        .bind(images.gallery_column())
        .fetch_one(&self.pool)
        .await?;

        let vehicle = used_vehicle_from_row(&row)?;
        info!("Created used vehicle {}", vehicle.id);
        Ok(vehicle)
    }

    async fn update_used(
        &self,
        id: i32,
        fields: &UsedVehicleFields,
        images: Option<&ImageSet>,
    ) -> DatabaseResult<()> {
        info!("Updating used vehicle: {}", id);

        sqlx::query(
            r#"
            UPDATE vehicles_usados
            SET brand = COALESCE($1, brand),
                modelo = COALESCE($2, modelo),
                year = COALESCE($3, year),
                km = COALESCE($4, km),
                price = COALESCE($5, price),
                description = COALESCE($6, description),
                image = CASE WHEN $7 THEN $8 ELSE image END,
                images = CASE WHEN $7 THEN $9 ELSE images END,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $10
            "#,
        )
        .bind(fields.brand.as_deref())
        .bind(fields.model.as_deref())
        .bind(fields.year)
        .bind(fields.mileage.as_deref())
        .bind(fields.price.as_deref())
        .bind(fields.description.as_deref())
        .bind(images.is_some())
        .bind(images.and_then(|set| set.image.clone()))
        .bind(images.and_then(|set| set.gallery_column()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, kind: VehicleKind, id: i32) -> DatabaseResult<()> {
        info!("Deleting vehicle {} from {}", id, kind.table());

        sqlx::query(&format!("DELETE FROM {} WHERE id = $1", kind.table()))
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn image_rows(&self, kind: VehicleKind) -> DatabaseResult<Vec<ImageRow>> {
        let rows = sqlx::query(&format!(
            "SELECT id, image, images FROM {} ORDER BY id",
            kind.table()
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> DatabaseResult<ImageRow> {
                let images: Option<String> = row.try_get("images")?;
                Ok(ImageRow {
                    id: row.try_get("id")?,
                    image: row.try_get("image")?,
                    images: decode_gallery(images.as_deref()),
                })
            })
            .collect()
    }

    async fn rewrite_images(
        &self,
        kind: VehicleKind,
        id: i32,
        images: &ImageSet,
    ) -> DatabaseResult<()> {
        sqlx::query(&format!(
            "UPDATE {} SET image = $1, images = $2 WHERE id = $3",
            kind.table()
        ))
        .bind(images.image.as_deref())
        .bind(images.gallery_column())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
