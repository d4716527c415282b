//! In-memory stores and a scripted payment issuer for tests

use async_trait::async_trait;
use chrono::Utc;
use common::error::DatabaseResult;
use std::collections::BTreeMap;
use std::sync::Mutex as StdMutex;
use tokio::sync::Mutex;

use crate::models::{
    Checkout, CheckoutLink, ConfigKey, ImageRow, ImageSet, NewVehicle, NewVehicleFields,
    UsedVehicle, UsedVehicleFields, VehicleKind,
};
use crate::payments::{PaymentError, PaymentLinkIssuer, PaymentResult};
use crate::repositories::{ConfigStore, VehicleStore};

#[derive(Default)]
struct Catalog {
    new: Vec<NewVehicle>,
    used: Vec<UsedVehicle>,
    next_id: i32,
}

impl Catalog {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

fn overwrite<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}

fn overwrite_opt<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        *slot = value.clone();
    }
}

/// Vec-backed `VehicleStore` with the same ordering and partial-update rules as the tables
#[derive(Default)]
pub struct InMemoryVehicleStore {
    inner: Mutex<Catalog>,
}

impl InMemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a bare row holding the given image columns, as older rows may
    pub async fn put_images(&self, kind: VehicleKind, row: ImageRow) -> i32 {
        let images = ImageSet {
            image: row.image,
            images: row.images,
        };
        match kind {
            VehicleKind::New => {
                let fields = NewVehicleFields {
                    brand: Some("legacy".to_string()),
                    name: Some("legacy".to_string()),
                    ..Default::default()
                };
                self.insert_new(&fields, &images).await.unwrap_or_default()
            }
            VehicleKind::Used => self
                .insert_used(&UsedVehicleFields::default(), &images)
                .await
                .map(|vehicle| vehicle.id)
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleStore {
    async fn list_new(&self) -> DatabaseResult<Vec<NewVehicle>> {
        let mut vehicles = self.inner.lock().await.new.clone();
        vehicles.sort_by_key(|v| v.id);
        Ok(vehicles)
    }

    async fn list_used(&self) -> DatabaseResult<Vec<UsedVehicle>> {
        let mut vehicles = self.inner.lock().await.used.clone();
        vehicles.sort_by_key(|v| std::cmp::Reverse(v.id));
        Ok(vehicles)
    }

    async fn count_new(&self) -> DatabaseResult<i64> {
        Ok(self.inner.lock().await.new.len() as i64)
    }

    async fn insert_new(&self, fields: &NewVehicleFields, images: &ImageSet) -> DatabaseResult<i32> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id();
        let now = Some(Utc::now().naive_utc());
        inner.new.push(NewVehicle {
            id,
            brand: fields.brand.clone().unwrap_or_default(),
            name: fields.name.clone().unwrap_or_default(),
            price: fields.price.clone(),
            financing_plan: fields.financing_plan.clone(),
            down_payment: fields.down_payment.clone(),
            installment: fields.installment.clone(),
            description: fields.description.clone(),
            image: images.image.clone(),
            images: images.images.clone(),
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn update_new(
        &self,
        id: i32,
        fields: &NewVehicleFields,
        images: Option<&ImageSet>,
    ) -> DatabaseResult<()> {
        let mut inner = self.inner.lock().await;
        if let Some(vehicle) = inner.new.iter_mut().find(|v| v.id == id) {
            overwrite(&mut vehicle.brand, &fields.brand);
            overwrite(&mut vehicle.name, &fields.name);
            overwrite_opt(&mut vehicle.price, &fields.price);
            overwrite_opt(&mut vehicle.financing_plan, &fields.financing_plan);
            overwrite_opt(&mut vehicle.down_payment, &fields.down_payment);
            overwrite_opt(&mut vehicle.installment, &fields.installment);
            overwrite_opt(&mut vehicle.description, &fields.description);
            if let Some(set) = images {
                vehicle.image = set.image.clone();
                vehicle.images = set.images.clone();
            }
            vehicle.updated_at = Some(Utc::now().naive_utc());
        }
        Ok(())
    }

    async fn insert_used(
        &self,
        fields: &UsedVehicleFields,
        images: &ImageSet,
    ) -> DatabaseResult<UsedVehicle> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id();
        let now = Some(Utc::now().naive_utc());
        let vehicle = UsedVehicle {
            id,
            brand: fields.brand.clone().unwrap_or_default(),
            model: fields.model.clone().unwrap_or_default(),
            year: fields.year,
            mileage: fields.mileage.clone(),
            price: fields.price.clone(),
            description: fields.description.clone(),
            image: images.image.clone(),
            images: images.images.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.used.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update_used(
        &self,
        id: i32,
        fields: &UsedVehicleFields,
        images: Option<&ImageSet>,
    ) -> DatabaseResult<()> {
        let mut inner = self.inner.lock().await;
        if let Some(vehicle) = inner.used.iter_mut().find(|v| v.id == id) {
            overwrite(&mut vehicle.brand, &fields.brand);
            overwrite(&mut vehicle.model, &fields.model);
            overwrite_opt(&mut vehicle.year, &fields.year);
            overwrite_opt(&mut vehicle.mileage, &fields.mileage);
            overwrite_opt(&mut vehicle.price, &fields.price);
            overwrite_opt(&mut vehicle.description, &fields.description);
            if let Some(set) = images {
                vehicle.image = set.image.clone();
                vehicle.images = set.images.clone();
            }
            vehicle.updated_at = Some(Utc::now().naive_utc());
        }
        Ok(())
    }

    async fn delete(&self, kind: VehicleKind, id: i32) -> DatabaseResult<()> {
        let mut inner = self.inner.lock().await;
        match kind {
            VehicleKind::New => inner.new.retain(|v| v.id != id),
            VehicleKind::Used => inner.used.retain(|v| v.id != id),
        }
        Ok(())
    }

    async fn image_rows(&self, kind: VehicleKind) -> DatabaseResult<Vec<ImageRow>> {
        let inner = self.inner.lock().await;
        let rows = match kind {
            VehicleKind::New => inner
                .new
                .iter()
                .map(|v| ImageRow {
                    id: v.id,
                    image: v.image.clone(),
                    images: v.images.clone(),
                })
                .collect(),
            VehicleKind::Used => inner
                .used
                .iter()
                .map(|v| ImageRow {
                    id: v.id,
                    image: v.image.clone(),
                    images: v.images.clone(),
                })
                .collect(),
        };
        Ok(rows)
    }

    async fn rewrite_images(
        &self,
        kind: VehicleKind,
        id: i32,
        images: &ImageSet,
    ) -> DatabaseResult<()> {
        let mut inner = self.inner.lock().await;
        match kind {
            VehicleKind::New => {
                if let Some(v) = inner.new.iter_mut().find(|v| v.id == id) {
                    v.image = images.image.clone();
                    v.images = images.images.clone();
                }
            }
            VehicleKind::Used => {
                if let Some(v) = inner.used.iter_mut().find(|v| v.id == id) {
                    v.image = images.image.clone();
                    v.images = images.images.clone();
                }
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryConfigStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn get_all(&self) -> DatabaseResult<BTreeMap<String, String>> {
        Ok(self.entries.lock().await.clone())
    }

    async fn upsert(&self, key: ConfigKey, value: &str) -> DatabaseResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.as_str().to_string(), value.to_string());
        Ok(())
    }
}

/// Payment issuer that records checkouts and answers with fake links
#[derive(Default)]
pub struct StubPayments {
    checkouts: StdMutex<Vec<Checkout>>,
    reject: bool,
}

impl StubPayments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            checkouts: StdMutex::new(Vec::new()),
            reject: true,
        }
    }

    pub fn checkouts(&self) -> Vec<Checkout> {
        self.checkouts
            .lock()
            .map(|checkouts| checkouts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PaymentLinkIssuer for StubPayments {
    async fn create_checkout(&self, checkout: &Checkout) -> PaymentResult<CheckoutLink> {
        if self.reject {
            return Err(PaymentError::Rejected {
                status: 400,
                body: "invalid preference".to_string(),
            });
        }

        let count = match self.checkouts.lock() {
            Ok(mut checkouts) => {
                checkouts.push(checkout.clone());
                checkouts.len()
            }
            Err(_) => 0,
        };
        Ok(CheckoutLink {
            init_point: format!("https://checkout.test/pref-{}", count),
            id: format!("pref-{}", count),
        })
    }
}
