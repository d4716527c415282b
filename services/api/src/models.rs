//! API models for request and response payloads

pub mod lenient;
pub mod payment;
pub mod site_config;
pub mod vehicle;

pub use payment::{Checkout, CheckoutLink, CheckoutRequest};
pub use site_config::{ConfigKey, ConfigUpdate};
pub use vehicle::{
    ImageInput, ImageRow, ImageSet, MAX_GALLERY_IMAGES, NewVehicle, NewVehicleFields,
    NewVehiclePayload, UsedVehicle, UsedVehicleFields, UsedVehiclePayload, VehicleKind,
};
