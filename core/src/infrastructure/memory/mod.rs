//! JSON document store backing the service in tests and local experiments. Only compiled for
//! this crate's tests or with the `memory` feature.

mod collection;
mod repositories;

pub use collection::InMemoryCollection;
pub use repositories::{
    InMemoryBootcampRepository, InMemoryCourseRepository, InMemoryReviewRepository,
    InMemoryUserRepository,
};

use crate::domain::{
    common::services::Service, geo::ports::Geocoder, query::services::QueryTranslator,
};

/// Service wired entirely to in-memory storage.
pub type MemoryService<G> = Service<
    InMemoryBootcampRepository,
    InMemoryCourseRepository,
    InMemoryReviewRepository,
    InMemoryUserRepository,
    G,
>;

impl<G: Geocoder> MemoryService<G> {
    /// Empty stores; courses and reviews expand `bootcamp` from the bootcamp store.
    pub fn in_memory(geocoder: G, query: QueryTranslator) -> Self {
        let bootcamps = InMemoryBootcampRepository::default();
        let reviews = InMemoryReviewRepository::new(&bootcamps);

        Service::new(
            bootcamps.clone(),
            InMemoryCourseRepository::new(&bootcamps),
            reviews.clone(),
            InMemoryUserRepository::new(&reviews),
            geocoder,
            query,
        )
    }
}
