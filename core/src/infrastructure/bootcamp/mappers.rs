use sea_orm::ActiveValue::Set;
use serde::de::DeserializeOwned;
use tracing::error;

use crate::domain::{
    bootcamp::entities::{Bootcamp, Career, Location},
    common::entities::app_errors::CoreError,
};
use crate::entity::bootcamps::{ActiveModel as BootcampActiveModel, Model as BootcampModel};

fn from_json<T: DeserializeOwned>(column: &str, value: serde_json::Value) -> Result<T, CoreError> {
    serde_json::from_value(value).map_err(|e| {
        error!("Failed to decode bootcamp {}: {}", column, e);
        CoreError::InternalServerError
    })
}

fn to_json<T: serde::Serialize>(column: &str, value: &T) -> Result<serde_json::Value, CoreError> {
    serde_json::to_value(value).map_err(|e| {
        error!("Failed to encode bootcamp {}: {}", column, e);
        CoreError::InternalServerError
    })
}

impl TryFrom<BootcampModel> for Bootcamp {
    type Error = CoreError;

    fn try_from(model: BootcampModel) -> Result<Self, Self::Error> {
        let location: Option<Location> = model
            .location
            .map(|location| from_json("location", location))
            .transpose()?;
        let careers: Vec<Career> = from_json("careers", model.careers)?;

        Ok(Bootcamp {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            website: model.website,
            phone: model.phone,
            email: model.email,
            address: model.address,
            location,
            careers,
            average_rating: model.average_rating,
            average_cost: model.average_cost,
            photo: model.photo,
            housing: model.housing,
            job_assistance: model.job_assistance,
            job_guarantee: model.job_guarantee,
            accept_gi: model.accept_gi,
            created_at: model.created_at.and_utc(),
        })
    }
}

impl TryFrom<&Bootcamp> for BootcampActiveModel {
    type Error = CoreError;

    fn try_from(bootcamp: &Bootcamp) -> Result<Self, Self::Error> {
        let location = bootcamp
            .location
            .as_ref()
            .map(|location| to_json("location", location))
            .transpose()?;

        Ok(BootcampActiveModel {
            id: Set(bootcamp.id),
            name: Set(bootcamp.name.clone()),
            slug: Set(bootcamp.slug.clone()),
            description: Set(bootcamp.description.clone()),
            website: Set(bootcamp.website.clone()),
            phone: Set(bootcamp.phone.clone()),
            email: Set(bootcamp.email.clone()),
            address: Set(bootcamp.address.clone()),
            location: Set(location),
            careers: Set(to_json("careers", &bootcamp.careers)?),
            average_rating: Set(bootcamp.average_rating),
            average_cost: Set(bootcamp.average_cost),
            photo: Set(bootcamp.photo.clone()),
            housing: Set(bootcamp.housing),
            job_assistance: Set(bootcamp.job_assistance),
            job_guarantee: Set(bootcamp.job_guarantee),
            accept_gi: Set(bootcamp.accept_gi),
            created_at: Set(bootcamp.created_at.naive_utc()),
        })
    }
}
